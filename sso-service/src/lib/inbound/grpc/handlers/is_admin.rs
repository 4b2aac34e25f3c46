use crate::domain::auth::context::CallContext;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::validation::parse_user_id;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S: AuthServicePort>(
    service: &S,
    ctx: CallContext,
    request: IsAdminRequest,
) -> Result<IsAdminResponse, tonic::Status> {
    let user_id = parse_user_id(request.user_id)?;

    let is_admin = service.is_admin(&ctx, user_id).await?;

    Ok(IsAdminResponse { is_admin })
}

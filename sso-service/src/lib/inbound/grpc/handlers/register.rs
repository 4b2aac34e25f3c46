use crate::domain::auth::context::CallContext;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::validation::RegisterInput;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    ctx: CallContext,
    request: RegisterRequest,
) -> Result<RegisterResponse, tonic::Status> {
    let input = RegisterInput::parse(request.email, request.password)?;

    let user_id = service
        .register_new_user(&ctx, &input.email, &input.password)
        .await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}

use crate::domain::auth::context::CallContext;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::validation::LoginInput;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: &S,
    ctx: CallContext,
    request: LoginRequest,
) -> Result<LoginResponse, tonic::Status> {
    let input = LoginInput::parse(request.email, request.password, request.app_id)?;

    let token = service
        .login(&ctx, &input.email, &input.password, input.app_id)
        .await?;

    Ok(LoginResponse {
        token: token.into_inner(),
    })
}

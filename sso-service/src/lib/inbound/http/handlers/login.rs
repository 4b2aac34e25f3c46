use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::context::CallContext;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::inbound::validation::LoginInput;

pub async fn login<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let input = LoginInput::parse(body.email, body.password, body.app_id)?;
    let ctx = CallContext::with_timeout(state.request_timeout);

    let token = state
        .auth_service
        .login(&ctx, &input.email, &input.password, input.app_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: token.into_inner(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
    app_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}

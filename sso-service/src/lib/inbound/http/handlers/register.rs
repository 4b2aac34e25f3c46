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
use crate::inbound::validation::RegisterInput;

pub async fn register<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let input = RegisterInput::parse(body.email, body.password)?;
    let ctx = CallContext::with_timeout(state.request_timeout);

    state
        .auth_service
        .register_new_user(&ctx, &input.email, &input.password)
        .await
        .map_err(ApiError::from)
        .map(|user_id| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData {
                    user_id: user_id.0,
                },
            )
        })
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user_id: i64,
}

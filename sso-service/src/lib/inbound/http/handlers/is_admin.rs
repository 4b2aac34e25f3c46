use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::context::CallContext;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::inbound::validation::parse_user_id;

pub async fn is_admin<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Path(user_id): Path<i64>,
) -> Result<ApiSuccess<IsAdminResponseData>, ApiError> {
    let user_id = parse_user_id(user_id)?;
    let ctx = CallContext::with_timeout(state.request_timeout);

    let is_admin = state.auth_service.is_admin(&ctx, user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        IsAdminResponseData {
            user_id: user_id.0,
            is_admin,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsAdminResponseData {
    pub user_id: i64,
    pub is_admin: bool,
}

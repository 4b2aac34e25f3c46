use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::is_admin::is_admin;
use super::handlers::login::login;
use super::handlers::register::register;
use crate::domain::auth::ports::AuthServicePort;

/// Shared state handed to every HTTP handler.
pub struct AppState<S: AuthServicePort> {
    pub auth_service: Arc<S>,
    /// Deadline applied to each request's call context
    pub request_timeout: Duration,
}

impl<S: AuthServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            request_timeout: self.request_timeout,
        }
    }
}

pub fn create_router<S: AuthServicePort>(auth_service: Arc<S>, request_timeout: Duration) -> Router {
    let state = AppState {
        auth_service,
        request_timeout,
    };

    let auth_routes = Router::new()
        .route("/api/auth/register", post(register::<S>))
        .route("/api/auth/login", post(login::<S>));

    let user_routes = Router::new().route("/api/users/:user_id/admin", get(is_admin::<S>));

    // Headers are left out of the span; request bodies carry passwords and
    // clients may send credentials in Authorization.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/health", get(health))
        .merge(auth_routes)
        .merge(user_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

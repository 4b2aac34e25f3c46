use std::sync::Arc;
use std::time::Duration;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::is_admin;
use super::handlers::login;
use super::handlers::register;
use super::timeout::call_context;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::Auth;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

/// gRPC adapter for the `sso.Auth` service.
pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
    default_timeout: Duration,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>, default_timeout: Duration) -> Self {
        Self {
            service,
            default_timeout,
        }
    }
}

#[tonic::async_trait]
impl<S: AuthServicePort> Auth for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let ctx = call_context(request.metadata(), self.default_timeout);
        let response = register::register(self.service.as_ref(), ctx, request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let ctx = call_context(request.metadata(), self.default_timeout);
        let response = login::login(self.service.as_ref(), ctx, request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let ctx = call_context(request.metadata(), self.default_timeout);
        let response = is_admin::is_admin(self.service.as_ref(), ctx, request.into_inner()).await?;
        Ok(Response::new(response))
    }
}

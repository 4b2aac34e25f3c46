use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::SessionClaims;
use auth::TokenIssuer;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use secrecy::ExposeSecret;
use tokio::task;

use crate::domain::auth::context::CallContext;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::SessionToken;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::ApplicationRegistry;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialStore;

/// Authentication orchestrator.
///
/// Composes the credential store, application registry, password hasher, and token
/// issuer. Holds no per-call state, so one instance serves any number of concurrent
/// requests.
pub struct AuthService<CS, AR>
where
    CS: CredentialStore,
    AR: ApplicationRegistry,
{
    credential_store: Arc<CS>,
    application_registry: Arc<AR>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_ttl: Duration,
}

impl<CS, AR> AuthService<CS, AR>
where
    CS: CredentialStore,
    AR: ApplicationRegistry,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `credential_store` - User persistence implementation
    /// * `application_registry` - Application lookup implementation
    /// * `password_hasher` - Hasher configured with the deployment's work factor
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(
        credential_store: Arc<CS>,
        application_registry: Arc<AR>,
        password_hasher: PasswordHasher,
        token_ttl: Duration,
    ) -> Self {
        Self {
            credential_store,
            application_registry,
            password_hasher,
            token_issuer: TokenIssuer::new(),
            token_ttl,
        }
    }

    /// Sign a token for `user` scoped to `app`, expiring `token_ttl` after `issued_at`.
    fn issue_token(
        &self,
        user: &User,
        app: &Application,
        issued_at: DateTime<Utc>,
    ) -> Result<SessionToken, AuthError> {
        let claims = SessionClaims::new(
            user.id.0,
            user.email.as_str(),
            app.id.0,
            issued_at,
            self.token_ttl,
        );

        self.token_issuer
            .issue(&claims, app.secret.expose_secret().as_bytes())
            .map(SessionToken::new)
            .map_err(|e| internal(e, "issue token"))
    }

    async fn hash_password(&self, ctx: &CallContext, password: &str) -> Result<String, AuthError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();

        ctx.run(task::spawn_blocking(move || hasher.hash(&password)))
            .await?
            .map_err(|e| internal(e, "password hashing task"))?
            .map_err(|e| internal(e, "hash password"))
    }

    async fn verify_password(
        &self,
        ctx: &CallContext,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();

        let verified = ctx
            .run(task::spawn_blocking(move || {
                hasher.verify(&password, &password_hash)
            }))
            .await?
            .map_err(|e| internal(e, "password verification task"))?;

        match verified {
            Ok(matches) => Ok(matches),
            Err(e @ PasswordError::InvalidHash(_)) => Err(internal(e, "stored password hash")),
            Err(e) => Err(internal(e, "verify password")),
        }
    }
}

/// Wrap a collaborator failure as `Internal`, logging the full cause chain.
fn internal<E>(cause: E, operation: &'static str) -> AuthError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let cause = anyhow::Error::new(cause).context(operation);
    tracing::error!(error = %format!("{:#}", cause), "{} failed", operation);
    AuthError::Internal(cause)
}

#[async_trait]
impl<CS, AR> AuthServicePort for AuthService<CS, AR>
where
    CS: CredentialStore,
    AR: ApplicationRegistry,
{
    #[tracing::instrument(name = "auth.login", skip_all, fields(email = %email, app_id = %app_id))]
    async fn login(
        &self,
        ctx: &CallContext,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<SessionToken, AuthError> {
        tracing::info!("attempting to login user");

        let user = match ctx.run(self.credential_store.find_user_by_email(email)).await? {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                tracing::warn!("user not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(internal(e, "find user by email")),
        };

        if !self.verify_password(ctx, password, &user.password_hash).await? {
            tracing::info!(user_id = %user.id, "invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match ctx.run(self.application_registry.get_application(app_id)).await? {
            Ok(app) => app,
            Err(StorageError::AppNotFound) => {
                tracing::warn!("application not found");
                return Err(AuthError::InvalidAppId);
            }
            Err(e) => return Err(internal(e, "get application")),
        };

        let token = self.issue_token(&user, &app, Utc::now())?;

        tracing::info!(user_id = %user.id, "user logged in successfully");

        Ok(token)
    }

    #[tracing::instrument(name = "auth.register_new_user", skip_all, fields(email = %email))]
    async fn register_new_user(
        &self,
        ctx: &CallContext,
        email: &EmailAddress,
        password: &str,
    ) -> Result<UserId, AuthError> {
        tracing::info!("registering user");

        let password_hash = self.hash_password(ctx, password).await?;

        // Last point the deadline may abort. An issued insert is awaited to completion so
        // that a committed row is always reported to the caller.
        ctx.check()?;

        match self
            .credential_store
            .save_user(email.as_str(), &password_hash)
            .await
        {
            Ok(user_id) => {
                tracing::info!(user_id = %user_id, "user registered");
                Ok(user_id)
            }
            Err(StorageError::UserExists) => {
                tracing::warn!("user already exists");
                Err(AuthError::UserAlreadyExists)
            }
            Err(e) => Err(internal(e, "save user")),
        }
    }

    #[tracing::instrument(name = "auth.is_admin", skip_all, fields(user_id = %user_id))]
    async fn is_admin(&self, ctx: &CallContext, user_id: UserId) -> Result<bool, AuthError> {
        tracing::info!("checking if user is admin");

        match ctx.run(self.credential_store.find_admin_flag(user_id)).await? {
            Ok(is_admin) => {
                tracing::info!(is_admin, "checked if user is admin");
                Ok(is_admin)
            }
            Err(StorageError::UserNotFound) => {
                tracing::warn!("user not found");
                Err(AuthError::UserNotFound)
            }
            Err(e) => Err(internal(e, "find admin flag")),
        }
    }
}

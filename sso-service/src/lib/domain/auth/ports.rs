use async_trait::async_trait;

use crate::domain::auth::context::CallContext;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::SessionToken;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token for an application.
    ///
    /// # Arguments
    /// * `ctx` - Caller deadline
    /// * `email` - Login email, compared exactly as stored
    /// * `password` - Plaintext password
    /// * `app_id` - Application the token is issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `InvalidAppId` - Application does not exist
    /// * `Cancelled` - Deadline expired
    /// * `Internal` - Any other failure
    async fn login(
        &self,
        ctx: &CallContext,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<SessionToken, AuthError>;

    /// Register a new user account.
    ///
    /// # Returns
    /// Store-assigned user id
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Cancelled` - Deadline expired
    /// * `Internal` - Any other failure
    async fn register_new_user(
        &self,
        ctx: &CallContext,
        email: &EmailAddress,
        password: &str,
    ) -> Result<UserId, AuthError>;

    /// Check whether a user has administrative privileges.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    /// * `Cancelled` - Deadline expired
    /// * `Internal` - Any other failure
    async fn is_admin(&self, ctx: &CallContext, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persistence of user records.
///
/// Implementations enforce email uniqueness atomically through a storage constraint.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Returns
    /// Newly assigned user id
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Database` - Storage operation failed
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<UserId, StorageError>;

    /// Retrieve user by email.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Storage operation failed
    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError>;

    /// Retrieve the administrative flag of a user.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    /// * `Database` - Storage operation failed
    async fn find_admin_flag(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Lookup of provisioned client applications.
#[async_trait]
pub trait ApplicationRegistry: Send + Sync + 'static {
    /// Retrieve an application and its signing secret.
    ///
    /// # Errors
    /// * `AppNotFound` - No application with this id
    /// * `Database` - Storage operation failed
    async fn get_application(&self, app_id: AppId) -> Result<Application, StorageError>;
}

use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for numeric identifier validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("{0} is required")]
    Missing(&'static str),
}

/// Failures reported by the credential store and application registry.
///
/// Backend-specific errors are folded into `Database`, which keeps the driver error
/// as its source for diagnostics.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("user not found")]
    UserNotFound,

    #[error("user already exists")]
    UserExists,

    #[error("application not found")]
    AppNotFound,

    #[error("database error")]
    Database(#[source] anyhow::Error),
}

/// Caller-visible error for authentication operations.
///
/// Every collaborator failure is translated into exactly one of these kinds. The
/// `Internal` cause is reachable through `source()` for logging but is never part of
/// the message shown to callers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("invalid app id")]
    InvalidAppId,

    #[error("user not found")]
    UserNotFound,

    /// The caller's deadline expired before the operation completed.
    #[error("operation cancelled")]
    Cancelled,

    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl AuthError {
    pub fn internal(cause: impl Into<anyhow::Error>) -> Self {
        AuthError::Internal(cause.into())
    }
}

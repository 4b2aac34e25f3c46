use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored hash is not a valid PHC string: {0}")]
    InvalidHash(String),
}

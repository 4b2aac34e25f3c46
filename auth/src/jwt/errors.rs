use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

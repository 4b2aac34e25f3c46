use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use serde::Serialize;

use super::errors::TokenError;

/// Signs claims into compact JWS tokens (`header.payload.signature`, base64url).
///
/// The signing key is supplied per call, so one issuer serves every application:
/// each token is keyed with the secret of the application it is issued for.
/// Uses HS256 (HMAC with SHA-256).
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    algorithm: Algorithm,
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims with an application secret.
    ///
    /// Pure function of its inputs: identical claims and secret give an identical token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    /// * `secret` - Application signing secret
    ///
    /// # Errors
    /// * `EmptySecret` - `secret` has no bytes
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue<T: Serialize>(&self, claims: &T, secret: &[u8]) -> Result<String, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &EncodingKey::from_secret(secret))
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

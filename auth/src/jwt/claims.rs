use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an application-scoped session token.
///
/// Field names are the signing contract shared with downstream verifiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user identifier)
    pub uid: i64,

    pub email: String,

    /// Application the token was issued for
    pub app_id: i32,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for a user and application, expiring `ttl` after `issued_at`.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - User email
    /// * `app_id` - Application identifier
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Token lifetime
    pub fn new(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            uid,
            email: email.into(),
            app_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

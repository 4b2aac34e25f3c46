use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::IdError;

/// User unique identifier, assigned by the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Accept an identifier received from a caller.
    ///
    /// # Errors
    /// * `Missing` - Zero is the wire default and never a stored id
    pub fn parse(raw: i64) -> Result<Self, IdError> {
        if raw == 0 {
            Err(IdError::Missing("user_id"))
        } else {
            Ok(Self(raw))
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Client application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(pub i32);

impl AppId {
    /// Accept an identifier received from a caller.
    ///
    /// # Errors
    /// * `Missing` - Zero is the wire default and never a provisioned app
    pub fn parse(raw: i32) -> Result<Self, IdError> {
        if raw == 0 {
            Err(IdError::Missing("app_id"))
        } else {
            Ok(Self(raw))
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored user record.
///
/// `password_hash` is an opaque PHC string; `Debug` never prints it.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

/// Client application with its confidential signing secret.
#[derive(Debug)]
pub struct Application {
    pub id: AppId,
    pub name: String,
    pub secret: SecretString,
}

/// Signed, application-scoped session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_zero_ids_rejected() {
        assert_eq!(UserId::parse(0), Err(IdError::Missing("user_id")));
        assert_eq!(AppId::parse(0), Err(IdError::Missing("app_id")));
        assert_eq!(UserId::parse(5), Ok(UserId(5)));
        assert_eq!(AppId::parse(-1), Ok(AppId(-1)));
    }

    #[test]
    fn test_user_debug_redacts_hash() {
        let user = User {
            id: UserId(1),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            is_admin: false,
        };

        let printed = format!("{:?}", user);
        assert!(!printed.contains("argon2id"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn test_application_debug_redacts_secret() {
        let app = Application {
            id: AppId(1),
            name: "test".to_string(),
            secret: SecretString::from("super-secret".to_string()),
        };

        assert!(!format!("{:?}", app).contains("super-secret"));
    }
}

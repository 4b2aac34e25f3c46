//! Authentication utilities library
//!
//! Provides the crypto building blocks of the single-sign-on service:
//! - Password hashing (Argon2id, tunable cost)
//! - Application-scoped session token issuance (HS256 JWT)
//!
//! Nothing here performs I/O. Storage, application lookup, and error translation
//! belong to the service that composes these pieces.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SessionClaims, TokenIssuer};
//! use chrono::{Duration, Utc};
//!
//! let issuer = TokenIssuer::new();
//! let claims = SessionClaims::new(1, "alice@example.com", 1, Utc::now(), Duration::hours(1));
//! let token = issuer.issue(&claims, b"app_secret_key_at_least_32_bytes!").unwrap();
//! assert_eq!(token.split('.').count(), 3);
//! ```

pub mod jwt;
pub mod password;

pub use jwt::SessionClaims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHasher;

//! Argon2id password hashing with a per-deployment work factor.

pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;

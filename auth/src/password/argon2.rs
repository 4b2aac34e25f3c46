use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Adaptive password hasher (Argon2id).
///
/// The work factor (memory, iterations, lanes) is tunable so the cost can be raised
/// over time. Every hash embeds its own parameters and salt, so hashes produced under
/// an older cost keep verifying after the cost is raised.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the library default Argon2id cost.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes over memory
    /// * `parallelism` - Degree of parallelism (lanes)
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside the ranges Argon2 accepts
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is generated on every call.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Digest comparison is constant-time. A well-formed hash that does not match, or that
    /// names an algorithm this hasher cannot run, yields `Ok(false)`.
    ///
    /// # Errors
    /// * `InvalidHash` - `hash` is not a PHC string at all
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

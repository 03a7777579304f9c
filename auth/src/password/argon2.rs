use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Hash verified when the claimed identity does not exist.
static ABSENT_USER_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Credential verifier over salted Argon2id hashes.
///
/// Parameters are the crate defaults and fixed for the life of the process;
/// every stored hash carries its own salt and parameters in PHC format.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext secret for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext secret
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - The primitive rejected the input
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a claimed secret against a stored hash.
    ///
    /// The digest comparison itself is constant-time inside `argon2`.
    ///
    /// # Returns
    /// `true` on match, `false` on mismatch
    ///
    /// # Errors
    /// * `VerificationFailed` - The stored hash cannot be parsed or used
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| PasswordError::VerificationFailed(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }

    /// Burn one verification for an identity that does not exist.
    ///
    /// Keeps "unknown identifier" as slow as "wrong secret" so response time
    /// does not reveal which half of a credential pair was wrong. Always
    /// reports a mismatch.
    pub fn verify_absent(&self, password: &str) -> bool {
        let dummy = ABSENT_USER_HASH.get_or_init(|| self.hash("absent-user-placeholder").ok());

        if let Some(hash) = dummy {
            let _ = self.verify(password, hash);
        }

        false
    }
}

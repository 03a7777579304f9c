use thiserror::Error;

/// Error type for credential hashing and verification.
///
/// A mismatching secret is not an error; these variants are system faults.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is unusable: {0}")]
    VerificationFailed(String),
}

use thiserror::Error;

/// Error type for signing and verifying tokens.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Signing key must be at least {min} bytes, got {actual}")]
    WeakKey { min: usize, actual: usize },

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token algorithm is not accepted")]
    InvalidAlgorithm,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}

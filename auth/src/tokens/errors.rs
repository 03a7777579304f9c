use thiserror::Error;

use crate::jwt::JwtError;
use crate::revocation::RevocationError;

/// Error type for issuing and validating access tokens.
///
/// Variants are for logs and tests only; callers at the trust boundary must
/// collapse every rejection into one outcome.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Token rejected: {0}")]
    Jwt(#[from] JwtError),

    #[error("Token is expired")]
    Expired,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Token lifetime of {0} seconds is out of range")]
    LifetimeOutOfRange(i64),

    #[error(transparent)]
    Revocation(#[from] RevocationError),
}

impl TokenError {
    /// Whether the failure concerns the presented token rather than the system.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TokenError::Revocation(_))
    }
}

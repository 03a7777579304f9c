use std::sync::Arc;

use super::errors::TokenError;
use crate::clock::Clock;
use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::revocation::RevocationRegistry;

/// Verifies presented tokens: signature, expiry, then revocation.
pub struct TokenValidator {
    handler: Arc<JwtHandler>,
    clock: Arc<dyn Clock>,
    revocations: Arc<RevocationRegistry>,
}

impl TokenValidator {
    pub fn new(
        handler: Arc<JwtHandler>,
        clock: Arc<dyn Clock>,
        revocations: Arc<RevocationRegistry>,
    ) -> Self {
        Self {
            handler,
            clock,
            revocations,
        }
    }

    /// Fully validate a token.
    ///
    /// # Returns
    /// The token's claims
    ///
    /// # Errors
    /// * `Jwt` - Malformed, wrong algorithm or bad signature
    /// * `Expired` - `exp` is in the past
    /// * `Revoked` - Issued at or before the subject's latest logout
    /// * `Revocation` - The revocation store could not be consulted
    pub async fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.check(token, true).await
    }

    /// Validate a token without enforcing `exp`.
    ///
    /// Signature and revocation are still checked. Meant for inspecting a
    /// payload, never for authorizing a request.
    pub async fn validate_ignoring_expiration(&self, token: &str) -> Result<Claims, TokenError> {
        self.check(token, false).await
    }

    async fn check(&self, token: &str, enforce_expiry: bool) -> Result<Claims, TokenError> {
        let claims = self.handler.decode(token)?;

        if enforce_expiry && claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        if self.revocations.is_revoked(&claims).await? {
            return Err(TokenError::Revoked);
        }

        Ok(claims)
    }
}

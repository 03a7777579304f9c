use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use super::errors::TokenError;
use crate::clock::Clock;
use crate::jwt::Claims;
use crate::jwt::JwtHandler;

/// Token type reported to clients.
pub const BEARER: &str = "bearer";

/// How long an issued token stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLifetime {
    /// Expires this many seconds after issuance.
    Seconds(i64),
    /// Never expires; only revocation ends it.
    Unlimited,
}

impl TokenLifetime {
    /// Interpret a TTL in seconds; any negative value means "no expiration".
    pub fn from_seconds(seconds: i64) -> Self {
        if seconds < 0 {
            TokenLifetime::Unlimited
        } else {
            TokenLifetime::Seconds(seconds)
        }
    }

    /// The lifetime as reported in `expires_in` (`-1` when unlimited).
    pub fn as_seconds(&self) -> i64 {
        match self {
            TokenLifetime::Seconds(seconds) => *seconds,
            TokenLifetime::Unlimited => -1,
        }
    }
}

/// A freshly signed access token and its metadata.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
    #[serde(skip)]
    pub claims: Claims,
}

/// Mints signed, time-bounded access tokens.
pub struct TokenIssuer {
    handler: Arc<JwtHandler>,
    clock: Arc<dyn Clock>,
    default_lifetime: TokenLifetime,
}

impl TokenIssuer {
    pub fn new(handler: Arc<JwtHandler>, clock: Arc<dyn Clock>, default_ttl_seconds: i64) -> Self {
        Self {
            handler,
            clock,
            default_lifetime: TokenLifetime::from_seconds(default_ttl_seconds),
        }
    }

    /// Issue a token for `subject`.
    ///
    /// # Arguments
    /// * `subject` - Authenticated subject identifier
    /// * `ttl_seconds` - Lifetime override; `None` uses the configured default,
    ///   a negative value issues a non-expiring token
    ///
    /// # Errors
    /// * `LifetimeOutOfRange` - Expiry cannot be represented
    /// * `Jwt` - Signing failed
    pub fn issue(&self, subject: &str, ttl_seconds: Option<i64>) -> Result<IssuedToken, TokenError> {
        let lifetime = ttl_seconds
            .map(TokenLifetime::from_seconds)
            .unwrap_or(self.default_lifetime);
        let issued_at = self.clock.now();

        let expires_at = match lifetime {
            TokenLifetime::Seconds(seconds) => Some(
                Duration::try_seconds(seconds)
                    .and_then(|ttl| issued_at.checked_add_signed(ttl))
                    .ok_or(TokenError::LifetimeOutOfRange(seconds))?,
            ),
            TokenLifetime::Unlimited => None,
        };

        let claims = Claims::issue(subject, issued_at, expires_at);
        let access_token = self.handler.encode(&claims)?;

        tracing::debug!(
            subject = %claims.sub,
            jti = %claims.jti,
            exp = ?claims.exp,
            "Access token issued"
        );

        Ok(IssuedToken {
            access_token,
            expires_in: lifetime.as_seconds(),
            token_type: BEARER.to_string(),
            claims,
        })
    }
}

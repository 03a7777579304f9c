use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::revocation::RevocationEntry;
use crate::revocation::RevocationError;
use crate::revocation::RevocationRegistry;
use crate::revocation::RevocationStore;
use crate::tokens::IssuedToken;
use crate::tokens::TokenError;
use crate::tokens::TokenIssuer;
use crate::tokens::TokenValidator;

/// Authentication coordinator combining credential verification, token
/// issuance, token validation and revocation.
///
/// One instance is built at startup and shared; every method is safe to call
/// concurrently.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    validator: TokenValidator,
    revocations: Arc<RevocationRegistry>,
}

/// Startup-time misconfiguration. Not recoverable per request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid signing key: {0}")]
    SigningKey(#[from] JwtError),

    #[error("Default token lifetime must be a positive number of seconds, got {0}")]
    InvalidDefaultTtl(i64),
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Any rejected token: malformed, expired, revoked or forged.
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    Issuance(TokenError),

    #[error("Revocation error: {0}")]
    Revocation(#[from] RevocationError),
}

impl From<TokenError> for AuthenticationError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Revocation(e) => AuthenticationError::Revocation(e),
            e if e.is_rejection() => AuthenticationError::Unauthenticated,
            e => AuthenticationError::Issuance(e),
        }
    }
}

impl Authenticator {
    /// Create an authenticator running on the system clock.
    ///
    /// # Arguments
    /// * `signing_key` - Shared HS256 secret, at least 32 bytes
    /// * `default_ttl_seconds` - Default token lifetime, also the revocation cutoff span
    /// * `revocation_store` - Backend for revocation entries
    ///
    /// # Errors
    /// * `SigningKey` - Key is too short
    /// * `InvalidDefaultTtl` - Lifetime is zero, negative or unrepresentable
    pub fn new(
        signing_key: &[u8],
        default_ttl_seconds: i64,
        revocation_store: Arc<dyn RevocationStore>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_clock(
            signing_key,
            default_ttl_seconds,
            revocation_store,
            Arc::new(SystemClock),
        )
    }

    /// Create an authenticator on an explicit clock.
    pub fn with_clock(
        signing_key: &[u8],
        default_ttl_seconds: i64,
        revocation_store: Arc<dyn RevocationStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigurationError> {
        let default_ttl = Duration::try_seconds(default_ttl_seconds)
            .filter(|_| default_ttl_seconds > 0)
            .ok_or(ConfigurationError::InvalidDefaultTtl(default_ttl_seconds))?;
        let handler = Arc::new(JwtHandler::new(signing_key)?);
        let revocations = Arc::new(RevocationRegistry::new(
            revocation_store,
            Arc::clone(&clock),
            default_ttl,
        ));

        Ok(Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(Arc::clone(&handler), Arc::clone(&clock), default_ttl_seconds),
            validator: TokenValidator::new(handler, clock, Arc::clone(&revocations)),
            revocations,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token with the default lifetime.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Subject to issue the token for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `Issuance` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        self.issue_token(subject, None)
    }

    /// Reject a login for an identity that does not exist.
    ///
    /// Spends the same hashing effort as a real verification before returning
    /// the same `InvalidCredentials` outcome.
    pub fn reject_unknown_identity(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_absent(password);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// # Arguments
    /// * `subject` - Already-authenticated subject
    /// * `ttl_seconds` - Lifetime override; negative for a non-expiring token
    ///
    /// # Errors
    /// * `Issuance` - Lifetime out of range or signing failed
    pub fn issue_token(
        &self,
        subject: &str,
        ttl_seconds: Option<i64>,
    ) -> Result<IssuedToken, AuthenticationError> {
        self.issuer
            .issue(subject, ttl_seconds)
            .map_err(AuthenticationError::Issuance)
    }

    /// Validate a presented token and return its subject.
    ///
    /// Every rejection is reported as `Unauthenticated`; the reason is only
    /// logged.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token rejected
    /// * `Revocation` - Revocation store unavailable
    pub async fn validate_token(&self, token: &str) -> Result<String, AuthenticationError> {
        self.validator
            .validate(token)
            .await
            .map(|claims| claims.sub)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Access token rejected");
                AuthenticationError::from(e)
            })
    }

    /// Decode a token's payload without enforcing expiry.
    ///
    /// Signature and revocation are still checked.
    pub async fn inspect_token(&self, token: &str) -> Result<Claims, AuthenticationError> {
        self.validator
            .validate_ignoring_expiration(token)
            .await
            .map_err(|e| {
                tracing::debug!(reason = %e, "Access token inspection rejected");
                AuthenticationError::from(e)
            })
    }

    /// Revoke every token issued to `subject` so far.
    pub async fn revoke(&self, subject: &str) -> Result<RevocationEntry, AuthenticationError> {
        Ok(self.revocations.revoke(subject).await?)
    }

    /// Revocation cutoff for `subject`, if it ever logged out.
    pub async fn cutoff_for(
        &self,
        subject: &str,
    ) -> Result<Option<DateTime<Utc>>, AuthenticationError> {
        Ok(self.revocations.cutoff_for(subject).await?)
    }
}

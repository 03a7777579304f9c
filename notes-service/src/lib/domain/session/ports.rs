use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RegisterCommand;
use crate::domain::session::models::Session;
use crate::domain::user::models::UserId;

/// Port for session operations: registration, login and logout.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Create an account and open a session for it.
    ///
    /// # Arguments
    /// * `command` - Validated registration profile
    ///
    /// # Returns
    /// Session for the new user
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Email belongs to an existing account
    /// * `User` - Persistence failed
    /// * `Password` - Hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<Session, SessionError>;

    /// Verify credentials and open a session.
    ///
    /// # Returns
    /// `Some(session)` on success, `None` for an unknown email or wrong password
    ///
    /// # Errors
    /// * `User` - Lookup failed
    /// * `Authentication` - Stored hash unusable or signing failed
    async fn login(&self, command: LoginCommand) -> Result<Option<Session>, SessionError>;

    /// Revoke every token issued to the user so far. Idempotent.
    ///
    /// # Errors
    /// * `Authentication` - Revocation store unavailable
    async fn logout(&self, user_id: &UserId) -> Result<(), SessionError>;
}

use auth::AuthenticationError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Session facade errors.
///
/// Failed logins are not errors; they surface as `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Email already registered: {0}")]
    EmailAlreadyRegistered(String),

    #[error(transparent)]
    User(UserError),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => SessionError::EmailAlreadyRegistered(email),
            e => SessionError::User(e),
        }
    }
}

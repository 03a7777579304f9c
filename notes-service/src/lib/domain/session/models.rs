use auth::IssuedToken;
use serde::Serialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;

/// Validated registration profile.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
        password: Password,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }
}

/// Login attempt.
///
/// The password is not policy-checked here; whatever was typed goes to
/// verification.
#[derive(Clone)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session handed back to a client after login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    /// Lifetime in seconds, `-1` for a non-expiring token.
    pub expires_in: i64,
    pub token_type: String,
}

impl From<IssuedToken> for Session {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            expires_in: token.expires_in,
            token_type: token.token_type,
        }
    }
}

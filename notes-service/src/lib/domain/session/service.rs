use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RegisterCommand;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Session facade over the user store and the authenticator.
///
/// Password hashing and verification are CPU-bound and run on the blocking
/// pool.
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Shared credential and token authority
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn blocking<T, F>(&self, task: F) -> Result<T, SessionError>
    where
        T: Send + 'static,
        F: FnOnce(&Authenticator) -> T + Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || task(&authenticator))
            .await
            .map_err(|e| SessionError::Unknown(format!("Blocking task failed: {}", e)))
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, SessionError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            tracing::info!(email = %command.email, "Registration rejected: email taken");
            return Err(SessionError::EmailAlreadyRegistered(
                command.email.to_string(),
            ));
        }

        let password = command.password.expose().to_string();
        let password_hash = self
            .blocking(move |authenticator| authenticator.hash_password(&password))
            .await??;

        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        let token = self
            .authenticator
            .issue_token(&created_user.id.to_string(), None)?;

        Ok(token.into())
    }

    async fn login(&self, command: LoginCommand) -> Result<Option<Session>, SessionError> {
        let LoginCommand { email, password } = command;

        let Some(user) = self.repository.find_by_email(&email).await? else {
            let _ = self
                .blocking(move |authenticator| authenticator.reject_unknown_identity(&password))
                .await?;
            tracing::info!("Login rejected");
            return Ok(None);
        };

        let subject = user.id.to_string();
        let password_hash = user.password_hash.clone();
        let outcome = self
            .blocking(move |authenticator| {
                authenticator.authenticate(&password, &password_hash, &subject)
            })
            .await?;

        match outcome {
            Ok(token) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                Ok(Some(token.into()))
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!("Login rejected");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn logout(&self, user_id: &UserId) -> Result<(), SessionError> {
        self.authenticator.revoke(&user_id.to_string()).await?;
        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }
}

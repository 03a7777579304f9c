use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

/// A malformed email cannot belong to anyone, so it gets the same answer as
/// a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<Session>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(|_| ApiError::invalid_credentials())?;

    state
        .session_service
        .login(LoginCommand {
            email,
            password: body.password,
        })
        .await?
        .map(|session| ApiSuccess::new(StatusCode::OK, session))
        .ok_or_else(ApiError::invalid_credentials)
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

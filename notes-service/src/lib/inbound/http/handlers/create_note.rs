use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::NoteData;
use crate::domain::note::errors::NoteError;
use crate::domain::note::models::CreateNoteCommand;
use crate::domain::note::models::NoteDescription;
use crate::domain::note::models::NoteTitle;
use crate::domain::note::ports::NoteServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateNoteRequest>,
) -> Result<ApiSuccess<NoteData>, ApiError> {
    state
        .note_service
        .create_note(&user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::CREATED, note.into()))
}

/// HTTP request body for creating a note (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateNoteRequest {
    title: String,
    description: Option<String>,
}

impl CreateNoteRequest {
    fn try_into_command(self) -> Result<CreateNoteCommand, NoteError> {
        let title = NoteTitle::new(self.title)?;
        let description = self.description.map(NoteDescription::new).transpose()?;
        Ok(CreateNoteCommand::new(title, description))
    }
}

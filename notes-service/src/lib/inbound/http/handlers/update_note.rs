use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::NoteData;
use crate::domain::note::errors::NoteError;
use crate::domain::note::models::NoteDescription;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::NoteTitle;
use crate::domain::note::models::UpdateNoteCommand;
use crate::domain::note::ports::NoteServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a note (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl UpdateNoteRequest {
    fn try_into_command(self) -> Result<UpdateNoteCommand, NoteError> {
        let title = self.title.map(NoteTitle::new).transpose()?;
        let description = self.description.map(NoteDescription::new).transpose()?;

        Ok(UpdateNoteCommand { title, description })
    }
}

pub async fn update_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(note_id): Path<String>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<ApiSuccess<NoteData>, ApiError> {
    let note_id = NoteId::from_string(&note_id).map_err(NoteError::from)?;
    let command = req.try_into_command()?;

    state
        .note_service
        .update_note(&user.user_id, &note_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::OK, note.into()))
}

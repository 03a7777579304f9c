use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::note::errors::NoteError;
use crate::domain::note::models::NoteId;
use crate::domain::note::ports::NoteServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(note_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let note_id = NoteId::from_string(&note_id).map_err(NoteError::from)?;

    state
        .note_service
        .delete_note(&user.user_id, &note_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

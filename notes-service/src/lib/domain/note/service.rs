use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::CreateNoteCommand;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::UpdateNoteCommand;
use crate::domain::note::ports::NoteRepository;
use crate::domain::note::ports::NoteServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for note operations.
pub struct NoteService<NR>
where
    NR: NoteRepository,
{
    repository: Arc<NR>,
}

impl<NR> NoteService<NR>
where
    NR: NoteRepository,
{
    pub fn new(repository: Arc<NR>) -> Self {
        Self { repository }
    }

    async fn owned_note(&self, owner: &UserId, id: &NoteId) -> Result<Note, NoteError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|note| note.is_owned_by(owner))
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<NR> NoteServicePort for NoteService<NR>
where
    NR: NoteRepository,
{
    async fn create_note(
        &self,
        owner: &UserId,
        command: CreateNoteCommand,
    ) -> Result<Note, NoteError> {
        let now = Utc::now();
        let note = Note {
            id: NoteId::new(),
            owner: *owner,
            title: command.title,
            description: command.description,
            created_at: now,
            updated_at: now,
        };

        let created_note = self.repository.create(note).await?;
        tracing::debug!(note_id = %created_note.id, owner = %owner, "Note created");

        Ok(created_note)
    }

    async fn list_notes(&self, owner: &UserId) -> Result<Vec<Note>, NoteError> {
        self.repository.list_by_owner(owner).await
    }

    async fn get_note(&self, owner: &UserId, id: &NoteId) -> Result<Note, NoteError> {
        self.owned_note(owner, id).await
    }

    async fn update_note(
        &self,
        owner: &UserId,
        id: &NoteId,
        command: UpdateNoteCommand,
    ) -> Result<Note, NoteError> {
        let mut note = self.owned_note(owner, id).await?;

        if let Some(title) = command.title {
            note.title = title;
        }

        if let Some(description) = command.description {
            note.description = Some(description);
        }

        note.updated_at = Utc::now().max(note.created_at);

        self.repository.update(note).await
    }

    async fn delete_note(&self, owner: &UserId, id: &NoteId) -> Result<(), NoteError> {
        let note = self.owned_note(owner, id).await?;
        self.repository.delete(&note.id).await?;
        tracing::debug!(note_id = %id, owner = %owner, "Note deleted");
        Ok(())
    }
}

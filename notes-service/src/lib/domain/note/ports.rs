use async_trait::async_trait;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::CreateNoteCommand;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::UpdateNoteCommand;
use crate::domain::user::models::UserId;

/// Port for note domain service operations.
///
/// Every operation is scoped to `owner`; a note belonging to someone else
/// is reported as `NotFound`.
#[async_trait]
pub trait NoteServicePort: Send + Sync + 'static {
    /// Create a note owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_note(
        &self,
        owner: &UserId,
        command: CreateNoteCommand,
    ) -> Result<Note, NoteError>;

    /// List the owner's notes, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_notes(&self, owner: &UserId) -> Result<Vec<Note>, NoteError>;

    /// Retrieve one of the owner's notes.
    ///
    /// # Errors
    /// * `NotFound` - No such note for this owner
    /// * `DatabaseError` - Database operation failed
    async fn get_note(&self, owner: &UserId, id: &NoteId) -> Result<Note, NoteError>;

    /// Apply a partial update to one of the owner's notes.
    ///
    /// # Errors
    /// * `NotFound` - No such note for this owner
    /// * `DatabaseError` - Database operation failed
    async fn update_note(
        &self,
        owner: &UserId,
        id: &NoteId,
        command: UpdateNoteCommand,
    ) -> Result<Note, NoteError>;

    /// Delete one of the owner's notes.
    ///
    /// # Errors
    /// * `NotFound` - No such note for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_note(&self, owner: &UserId, id: &NoteId) -> Result<(), NoteError>;
}

/// Persistence operations for the note aggregate.
#[async_trait]
pub trait NoteRepository: Send + Sync + 'static {
    async fn create(&self, note: Note) -> Result<Note, NoteError>;

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, NoteError>;

    /// Notes of `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Note>, NoteError>;

    /// Overwrite title, description and `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - Note does not exist
    async fn update(&self, note: Note) -> Result<Note, NoteError>;

    /// # Errors
    /// * `NotFound` - Note does not exist
    async fn delete(&self, id: &NoteId) -> Result<(), NoteError>;
}

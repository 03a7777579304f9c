use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::note::errors::NoteDescriptionError;
use crate::domain::note::errors::NoteIdError;
use crate::domain::note::errors::NoteTitleError;
use crate::domain::user::models::UserId;

/// Note aggregate entity.
///
/// Every note belongs to exactly one user and is only visible to that user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub owner: UserId,
    pub title: NoteTitle,
    pub description: Option<NoteDescription>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner == *user_id
    }
}

/// Note unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(pub Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a note ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, NoteIdError> {
        Uuid::parse_str(s)
            .map(NoteId)
            .map_err(|e| NoteIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Note title, trimmed, 1-200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTitle(String);

impl NoteTitle {
    const MAX_LENGTH: usize = 200;

    /// Create a validated title.
    ///
    /// # Errors
    /// * `Empty` - Blank after trimming
    /// * `TooLong` - More than 200 characters
    pub fn new(title: String) -> Result<Self, NoteTitleError> {
        let trimmed = title.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            return Err(NoteTitleError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(NoteTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form note body, at most 10 000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDescription(String);

impl NoteDescription {
    const MAX_LENGTH: usize = 10_000;

    pub fn new(description: String) -> Result<Self, NoteDescriptionError> {
        let length = description.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NoteDescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a note
#[derive(Debug, Clone)]
pub struct CreateNoteCommand {
    pub title: NoteTitle,
    pub description: Option<NoteDescription>,
}

impl CreateNoteCommand {
    pub fn new(title: NoteTitle, description: Option<NoteDescription>) -> Self {
        Self { title, description }
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateNoteCommand {
    pub title: Option<NoteTitle>,
    pub description: Option<NoteDescription>,
}

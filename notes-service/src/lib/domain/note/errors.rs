use thiserror::Error;

/// Error for NoteId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for NoteTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteTitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for NoteDescription validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteDescriptionError {
    #[error("Description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all note domain operations
#[derive(Debug, Clone, Error)]
pub enum NoteError {
    #[error("Invalid note ID: {0}")]
    InvalidNoteId(#[from] NoteIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] NoteTitleError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] NoteDescriptionError),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

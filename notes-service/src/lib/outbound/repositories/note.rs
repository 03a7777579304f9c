use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteDescription;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::NoteTitle;
use crate::domain::note::ports::NoteRepository;
use crate::domain::user::models::UserId;

pub struct PostgresNoteRepository {
    pool: PgPool,
}

impl PostgresNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NoteRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = NoteError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        Ok(Note {
            id: NoteId(row.id),
            owner: UserId(row.owner_id),
            title: NoteTitle::new(row.title)?,
            description: row.description.map(NoteDescription::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> NoteError {
    NoteError::DatabaseError(e.to_string())
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn create(&self, note: Note) -> Result<Note, NoteError> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, owner_id, title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(note.id.0)
        .bind(note.owner.0)
        .bind(note.title.as_str())
        .bind(note.description.as_ref().map(|d| d.as_str()))
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(note)
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, owner_id, title, description, created_at, updated_at
            FROM notes
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Note::try_from)
        .transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Note>, NoteError> {
        sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, owner_id, title, description, created_at, updated_at
            FROM notes
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?
        .into_iter()
        .map(Note::try_from)
        .collect()
    }

    async fn update(&self, note: Note) -> Result<Note, NoteError> {
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET title = $2, description = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(note.id.0)
        .bind(note.title.as_str())
        .bind(note.description.as_ref().map(|d| d.as_str()))
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(NoteError::NotFound(note.id.to_string()));
        }

        Ok(note)
    }

    async fn delete(&self, id: &NoteId) -> Result<(), NoteError> {
        let result = sqlx::query(
            r#"
            DELETE FROM notes
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(NoteError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

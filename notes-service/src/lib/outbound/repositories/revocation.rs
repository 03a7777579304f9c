use async_trait::async_trait;
use auth::RevocationEntry;
use auth::RevocationError;
use auth::RevocationStore;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

/// Durable revocation store backed by the `token_revocations` table.
///
/// One row per subject. Upserts keep the later of the stored and incoming
/// instants in a single statement, so concurrent logouts from several
/// replicas converge.
pub struct PostgresRevocationStore {
    pool: PgPool,
}

impl PostgresRevocationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RevocationRow {
    subject: String,
    revoked_at: DateTime<Utc>,
    cutoff: DateTime<Utc>,
}

impl From<RevocationRow> for RevocationEntry {
    fn from(row: RevocationRow) -> Self {
        RevocationEntry {
            subject: row.subject,
            revoked_at: row.revoked_at,
            cutoff: row.cutoff,
        }
    }
}

fn unavailable(e: sqlx::Error) -> RevocationError {
    RevocationError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl RevocationStore for PostgresRevocationStore {
    async fn upsert(&self, entry: RevocationEntry) -> Result<RevocationEntry, RevocationError> {
        sqlx::query_as::<_, RevocationRow>(
            r#"
            INSERT INTO token_revocations (subject, revoked_at, cutoff)
            VALUES ($1, $2, $3)
            ON CONFLICT (subject) DO UPDATE
            SET revoked_at = GREATEST(token_revocations.revoked_at, EXCLUDED.revoked_at),
                cutoff = GREATEST(token_revocations.cutoff, EXCLUDED.cutoff)
            RETURNING subject, revoked_at, cutoff
            "#,
        )
        .bind(&entry.subject)
        .bind(entry.revoked_at)
        .bind(entry.cutoff)
        .fetch_one(&self.pool)
        .await
        .map(RevocationEntry::from)
        .map_err(unavailable)
    }

    async fn find(&self, subject: &str) -> Result<Option<RevocationEntry>, RevocationError> {
        sqlx::query_as::<_, RevocationRow>(
            r#"
            SELECT subject, revoked_at, cutoff
            FROM token_revocations
            WHERE subject = $1
            "#,
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(RevocationEntry::from))
        .map_err(unavailable)
    }
}

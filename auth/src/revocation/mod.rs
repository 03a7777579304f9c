//! Per-subject revocation ("logout everywhere").
//!
//! A logout records when it happened. Any token for that subject issued at or
//! before that instant is rejected, whatever its lifetime; tokens issued later
//! are unaffected. Both instants are compared at millisecond granularity, so a
//! token issued within the same millisecond as the logout counts as issued
//! before it. The registry owns the time arithmetic and delegates storage to a
//! [`RevocationStore`].

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use thiserror::Error;

use crate::clock::Clock;
use crate::jwt::Claims;

pub use memory::InMemoryRevocationStore;

/// Error for revocation storage backends.
#[derive(Debug, Clone, Error)]
pub enum RevocationError {
    #[error("Revocation store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Revocation state for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationEntry {
    pub subject: String,
    /// Instant of the latest logout.
    pub revoked_at: DateTime<Utc>,
    /// `revoked_at` plus the default token lifetime.
    pub cutoff: DateTime<Utc>,
}

impl RevocationEntry {
    /// Combine two entries for the same subject, keeping the later instants.
    ///
    /// Commutative, so concurrent logouts can land in any order.
    pub fn merge(self, other: RevocationEntry) -> RevocationEntry {
        RevocationEntry {
            subject: self.subject,
            revoked_at: self.revoked_at.max(other.revoked_at),
            cutoff: self.cutoff.max(other.cutoff),
        }
    }

    /// Whether this entry invalidates a token with the given claims.
    pub fn revokes(&self, claims: &Claims) -> bool {
        claims.sub == self.subject && claims.issued_at_millis() <= self.revoked_at.timestamp_millis()
    }
}

/// Storage for revocation entries, keyed by subject.
#[async_trait]
pub trait RevocationStore: Send + Sync + 'static {
    /// Merge `entry` into the stored entry for its subject atomically.
    ///
    /// # Returns
    /// The entry as stored after the merge
    ///
    /// # Errors
    /// * `StoreUnavailable` - Backend failure
    async fn upsert(&self, entry: RevocationEntry) -> Result<RevocationEntry, RevocationError>;

    /// Look up the entry for a subject.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Backend failure
    async fn find(&self, subject: &str) -> Result<Option<RevocationEntry>, RevocationError>;
}

/// Revocation registry shared by the logout path and the token validator.
pub struct RevocationRegistry {
    store: Arc<dyn RevocationStore>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
}

impl RevocationRegistry {
    pub fn new(store: Arc<dyn RevocationStore>, clock: Arc<dyn Clock>, default_ttl: Duration) -> Self {
        Self {
            store,
            clock,
            default_ttl,
        }
    }

    /// Revoke every token issued to `subject` up to now.
    ///
    /// Idempotent; repeated calls only move the entry forward in time.
    pub async fn revoke(&self, subject: &str) -> Result<RevocationEntry, RevocationError> {
        let now = self.clock.now();
        let entry = RevocationEntry {
            subject: subject.to_string(),
            revoked_at: now,
            cutoff: now + self.default_ttl,
        };

        let stored = self.store.upsert(entry).await?;
        tracing::info!(
            subject = %stored.subject,
            revoked_at = %stored.revoked_at,
            cutoff = %stored.cutoff,
            "Subject tokens revoked"
        );

        Ok(stored)
    }

    /// Current entry for `subject`, if it was ever revoked.
    pub async fn entry_for(&self, subject: &str) -> Result<Option<RevocationEntry>, RevocationError> {
        self.store.find(subject).await
    }

    /// Cutoff timestamp for `subject`, if it was ever revoked.
    pub async fn cutoff_for(&self, subject: &str) -> Result<Option<DateTime<Utc>>, RevocationError> {
        Ok(self.store.find(subject).await?.map(|entry| entry.cutoff))
    }

    /// Whether the token described by `claims` has been revoked.
    pub async fn is_revoked(&self, claims: &Claims) -> Result<bool, RevocationError> {
        Ok(self
            .store
            .find(&claims.sub)
            .await?
            .map_or(false, |entry| entry.revokes(claims)))
    }
}

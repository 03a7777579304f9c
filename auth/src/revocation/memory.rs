use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RevocationEntry;
use super::RevocationError;
use super::RevocationStore;

/// Process-local revocation store.
///
/// Holds at most one entry per subject. Contents are lost on restart, which
/// silently un-revokes every subject; use a durable store where that matters.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, RevocationEntry>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subjects with an entry.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn upsert(&self, entry: RevocationEntry) -> Result<RevocationEntry, RevocationError> {
        let mut entries = self.entries.write().await;

        let merged = match entries.remove(&entry.subject) {
            Some(existing) => existing.merge(entry),
            None => entry,
        };
        entries.insert(merged.subject.clone(), merged.clone());

        Ok(merged)
    }

    async fn find(&self, subject: &str) -> Result<Option<RevocationEntry>, RevocationError> {
        Ok(self.entries.read().await.get(subject).cloned())
    }
}

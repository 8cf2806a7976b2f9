use async_trait::async_trait;
use burrow_core::repository::{ReadRepository, Repository, Result};
use burrow_core::{LinkRecord, ShortCode, StorageError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// In-memory storage entry for a link.
#[derive(Debug, Clone)]
struct StoredLink {
    target_url: String,
    owner_id: String,
}

impl StoredLink {
    fn into_record(self, id: ShortCode) -> LinkRecord {
        LinkRecord {
            id,
            target_url: self.target_url,
            owner_id: self.owner_id,
        }
    }
}

/// In-memory implementation of the Repository trait using DashMap.
///
/// Inserts go through the entry API, which holds the shard lock across the
/// existence check and the write.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    storage: DashMap<ShortCode, StoredLink>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        Ok(self
            .storage
            .get(code)
            .map(|entry| entry.value().clone().into_record(code.clone())))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<LinkRecord>> {
        let mut records: Vec<LinkRecord> = self
            .storage
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| entry.value().clone().into_record(entry.key().clone()))
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        match self.storage.entry(record.id) {
            Entry::Occupied(entry) => Err(StorageError::Conflict(entry.key().to_string())),
            Entry::Vacant(entry) => {
                entry.insert(StoredLink {
                    target_url: record.target_url,
                    owner_id: record.owner_id,
                });
                Ok(())
            }
        }
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.remove(code).is_some())
    }
}

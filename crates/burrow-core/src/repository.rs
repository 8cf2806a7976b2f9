use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored link in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The short code, also the primary key of the record.
    pub id: ShortCode,
    /// The URL the short code resolves to.
    pub target_url: String,
    /// Opaque identifier of the owner who created the link.
    pub owner_id: String,
}

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;

    /// Checks whether a short code already exists in the repository.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;

    /// Returns every record whose `owner_id` equals `owner_id` exactly,
    /// ordered by short code.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<LinkRecord>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record if its short code is free.
    ///
    /// Returns `Err(StorageError::Conflict)` if the code already exists. The
    /// check and the write are a single atomic step.
    async fn insert(&self, record: LinkRecord) -> Result<()>;

    /// Deletes the record for a given short code.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;
}

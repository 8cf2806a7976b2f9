use crate::error::ShortenerError;
use crate::repository::LinkRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Default)]
pub struct ShortenParams {
    /// The URL to be shortened.
    pub target_url: String,
    /// Caller-chosen short code. Must be a valid [`ShortCode`] when present.
    pub custom_code: Option<String>,
    /// Opaque identifier of the caller.
    pub owner_id: String,
    /// Short code of a record this link supersedes. It is removed, on a
    /// best-effort basis, once the new record has been written.
    pub replaces: Option<String>,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL and returns the allocated short code.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortCode>;

    /// Resolves a short code to its stored record.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;
}

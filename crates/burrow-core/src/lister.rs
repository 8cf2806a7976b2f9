use crate::error::ListerError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Outcome of probing a link's target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// The target answered with this HTTP status code.
    Http(u16),
    /// The target could not be reached at the HTTP level (DNS failure,
    /// refused connection, timeout, TLS failure).
    Unreachable,
}

impl LinkStatus {
    /// Status code reported for targets that never produced an HTTP response.
    pub const UNREACHABLE_CODE: u16 = 0;

    /// Returns the numeric status, [`Self::UNREACHABLE_CODE`] for unreachable targets.
    pub fn code(&self) -> u16 {
        match self {
            LinkStatus::Http(code) => *code,
            LinkStatus::Unreachable => Self::UNREACHABLE_CODE,
        }
    }
}

impl Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkStatus::Http(code) => write!(f, "{}", code),
            LinkStatus::Unreachable => f.write_str("unreachable"),
        }
    }
}

impl Serialize for LinkStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.code())
    }
}

/// A stored link annotated with the current status of its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedLink {
    pub target_url: String,
    pub id: ShortCode,
    pub status: LinkStatus,
}

#[async_trait]
pub trait Lister: Send + Sync + 'static {
    /// Lists every link owned by `owner_id`, probing each target.
    async fn list(&self, owner_id: &str) -> Result<Vec<ListedLink>, ListerError>;
}

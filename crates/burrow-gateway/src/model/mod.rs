mod link;

pub use link::{HealthResponse, ListUrlsRequest, MessageResponse, ShortenUrlRequest};

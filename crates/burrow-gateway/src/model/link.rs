use burrow_core::ShortenParams;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/shorten_url`. Absent fields read as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShortenUrlRequest {
    pub url: String,
    pub custom_hash: String,
    pub oid: String,
    pub existing_id: String,
}

impl ShortenUrlRequest {
    pub fn into_params(self) -> ShortenParams {
        ShortenParams {
            target_url: self.url,
            custom_code: non_empty(self.custom_hash),
            owner_id: self.oid,
            replaces: non_empty(self.existing_id),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListUrlsRequest {
    pub oid: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let request: ShortenUrlRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();

        let params = request.into_params();
        assert_eq!(params.target_url, "https://example.com");
        assert_eq!(params.owner_id, "");
        assert!(params.custom_code.is_none());
        assert!(params.replaces.is_none());
    }

    #[test]
    fn non_empty_fields_are_carried_over() {
        let request: ShortenUrlRequest = serde_json::from_str(
            r#"{"url": "https://example.com", "custom_hash": "abcd1234", "oid": "u1", "existing_id": "old00001"}"#,
        )
        .unwrap();

        let params = request.into_params();
        assert_eq!(params.custom_code.as_deref(), Some("abcd1234"));
        assert_eq!(params.owner_id, "u1");
        assert_eq!(params.replaces.as_deref(), Some("old00001"));
    }
}

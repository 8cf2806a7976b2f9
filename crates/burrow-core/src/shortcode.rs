use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of characters in every short code.
pub const SHORT_CODE_LENGTH: usize = 8;

/// The characters a short code is drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A validated short code identifier for a shortened URL.
///
/// Short codes are exactly 8 ASCII alphanumeric characters. They are
/// case-sensitive: `abcDEF12` and `ABCdef12` are distinct codes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.len() != SHORT_CODE_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be {}, got {}",
                SHORT_CODE_LENGTH,
                code.len()
            )));
        }

        if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("abcd1234").is_ok());
        assert!(ShortCode::new("ABCDEFGH").is_ok());
        assert!(ShortCode::new("00000000").is_ok());
    }

    #[test]
    fn wrong_length() {
        assert!(ShortCode::new("short").is_err());
        assert!(ShortCode::new("").is_err());
        assert!(ShortCode::new("abcdefghi").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abcd-123").is_err());
        assert!(ShortCode::new("abcd_123").is_err());
        assert!(ShortCode::new("abcd 123").is_err());
        assert!(ShortCode::new("abcd/123").is_err());
    }

    #[test]
    fn non_ascii_alphanumerics_are_rejected() {
        // 'é' is alphanumeric in Unicode but outside the short code alphabet.
        assert!(ShortCode::new("abcdéf1").is_err());
        assert!(ShortCode::new("abcdefé1").is_err());
    }

    #[test]
    fn alphabet_matches_validation() {
        assert_eq!(ALPHABET.len(), 62);
        assert!(ALPHABET.iter().all(u8::is_ascii_alphanumeric));
    }

    #[test]
    fn to_url_trims_trailing_slash() {
        let code = ShortCode::new("abc12345").unwrap();
        assert_eq!(code.to_url("https://bur.row"), "https://bur.row/abc12345");
        assert_eq!(code.to_url("https://bur.row/"), "https://bur.row/abc12345");
    }

    #[test]
    fn deserialize_validates() {
        let code: ShortCode = serde_json::from_str("\"Zz9Yy8Xx\"").unwrap();
        assert_eq!(code.as_str(), "Zz9Yy8Xx");

        assert!(serde_json::from_str::<ShortCode>("\"nope\"").is_err());
    }

    #[test]
    fn serialize_as_plain_string() {
        let code = ShortCode::new("Zz9Yy8Xx").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"Zz9Yy8Xx\"");
    }
}

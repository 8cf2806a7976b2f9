use crate::Generator;
use burrow_core::shortcode::SHORT_CODE_LENGTH;
use burrow_core::{CoreError, ShortCode};
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic short code generator using a sequential counter.
///
/// This generator produces codes like "bw000000", "bw000001", etc: the prefix
/// followed by the counter, zero-padded to fill the 8 characters. Once the
/// counter no longer fits in the padded width it wraps around to zero, so
/// codes repeat and the caller's collision handling takes over.
///
/// For distributed deployments, each node should use a unique prefix
/// (e.g., "a", "b") so that nodes do not race for the same codes.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
    modulus: u64,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
            modulus: self.modulus,
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    ///
    /// The prefix must be 1 to 7 ASCII alphanumeric characters.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self, CoreError> {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state or distributing
    /// counter ranges across nodes.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Result<Self, CoreError> {
        let prefix = prefix.into();

        if prefix.is_empty() || prefix.len() >= SHORT_CODE_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "generator prefix must be 1 to {} characters, got {}",
                SHORT_CODE_LENGTH - 1,
                prefix.len()
            )));
        }
        if !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidShortCode(format!(
                "generator prefix must be alphanumeric: '{}'",
                prefix
            )));
        }

        let width = (SHORT_CODE_LENGTH - prefix.len()) as u32;
        Ok(Self {
            counter: AtomicU64::new(offset),
            prefix,
            modulus: 10_u64.pow(width),
        })
    }

    fn width(&self) -> usize {
        SHORT_CODE_LENGTH - self.prefix.len()
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst) % self.modulus;
        let code = format!("{}{:0width$}", self.prefix, count, width = self.width());
        ShortCode::new_unchecked(code)
    }
}

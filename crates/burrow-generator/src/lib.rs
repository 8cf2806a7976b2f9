//! Short code generators.
//!
//! Generators are pure: they never consult storage, so they cannot promise
//! that a code is free. Collision handling belongs to the caller.

pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use burrow_core::ShortCode;

/// Trait for generating short codes.
///
/// Every returned code must satisfy the [`ShortCode`] invariant
/// (8 ASCII alphanumeric characters).
pub trait Generator: Send + Sync + 'static {
    /// Generates a candidate short code.
    fn generate(&self) -> ShortCode;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self) -> ShortCode {
        (**self).generate()
    }
}

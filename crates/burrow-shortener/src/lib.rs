//! URL shortener service implementation.
//!
//! This crate provides [`ShortenerService`], the key allocator behind the
//! [`Shortener`][burrow_core::Shortener] trait. Core types are re-exported
//! from `burrow_core`.

pub mod service;

pub use burrow_core::{ShortenParams, Shortener, ShortenerError};
pub use service::{AllocatorSettings, ShortenerService, DEFAULT_MAX_ATTEMPTS};

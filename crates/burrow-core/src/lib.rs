//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the shared vocabulary of the workspace: the
//! [`ShortCode`] and [`LinkRecord`] types, the [`Repository`] storage
//! contract, and the [`Shortener`] and [`Lister`] service traits.

pub mod error;
pub mod lister;
pub mod repository;
pub mod shortcode;
pub mod shortener;
pub mod target_url;

pub use error::{CoreError, ListerError, ShortenerError, StorageError};
pub use lister::{LinkStatus, ListedLink, Lister};
pub use repository::{LinkRecord, ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::{ShortenParams, Shortener};
pub use target_url::is_valid_target_url;

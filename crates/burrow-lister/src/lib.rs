//! Per-owner link listing with liveness probes.
//!
//! [`ListerService`] reads an owner's links from a
//! [`ReadRepository`][burrow_core::ReadRepository] and asks a [`Prober`] for
//! the current status of every target URL. [`ReqwestProber`] is the HTTP
//! implementation used in production.

pub mod probe;
pub mod service;

pub use burrow_core::{LinkStatus, ListedLink, Lister, ListerError};
pub use probe::{ProbeSettings, Prober, ReqwestProber};
pub use service::{ListerService, ListerSettings};

//! HTTP front end of the Burrow URL shortener.
//!
//! The router is built from an [`AppState`] holding trait objects, so the
//! binary can pick storage and generator backends at startup while tests
//! drive the same router with in-memory doubles.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use error::AppError;
pub use state::AppState;

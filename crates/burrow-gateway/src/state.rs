use std::sync::Arc;

use burrow_core::{Lister, Shortener};

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    lister: Arc<dyn Lister>,
    short_url_base: Arc<str>,
}

impl AppState {
    /// `short_url_base` is the public prefix prepended to allocated codes,
    /// e.g. `https://burrow.example`.
    pub fn new(
        shortener: Arc<dyn Shortener>,
        lister: Arc<dyn Lister>,
        short_url_base: impl Into<String>,
    ) -> Self {
        Self {
            shortener,
            lister,
            short_url_base: Arc::from(short_url_base.into()),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn lister(&self) -> &dyn Lister {
        self.lister.as_ref()
    }

    pub fn short_url_base(&self) -> &str {
        &self.short_url_base
    }
}

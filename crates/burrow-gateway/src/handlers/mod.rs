mod health;
mod link;

pub use health::health_handler;
pub use link::{list_urls_handler, redirect_handler, shorten_url_handler};

use async_trait::async_trait;
use burrow_core::LinkStatus;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::{trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Checks whether a link target is alive.
///
/// Implementations never fail: anything that prevents an HTTP response is
/// reported as [`LinkStatus::Unreachable`].
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    /// Probes `url` and returns the status of its final response.
    async fn probe(&self, url: &str) -> LinkStatus;
}

/// Settings for [`ReqwestProber`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ProbeSettings {
    /// Upper bound for a single probe, redirects included.
    #[builder(default = DEFAULT_PROBE_TIMEOUT)]
    pub timeout: Duration,
    #[builder(default = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,
    #[builder(default = concat!("burrow-prober/", env!("CARGO_PKG_VERSION")).to_string(), setter(into))]
    pub user_agent: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Probes targets with an HTTP `HEAD` request, following redirects.
///
/// Error statuses (4xx, 5xx) are reported as they are; they are answers,
/// not failures.
#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: reqwest::Client,
}

impl ReqwestProber {
    pub fn new(settings: ProbeSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .redirect(Policy::limited(settings.max_redirects))
            .user_agent(settings.user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Prober for ReqwestProber {
    async fn probe(&self, url: &str) -> LinkStatus {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                trace!(url = %url, status, "probed link target");
                LinkStatus::Http(status)
            }
            Err(e) => {
                warn!(url = %url, error = %e, timeout = e.is_timeout(), "link target unreachable");
                LinkStatus::Unreachable
            }
        }
    }
}

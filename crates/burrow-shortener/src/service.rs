use async_trait::async_trait;
use burrow_core::{
    is_valid_target_url, LinkRecord, Repository, ShortCode, ShortenParams, Shortener,
    ShortenerError, StorageError,
};
use burrow_generator::Generator;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};
use typed_builder::TypedBuilder;

/// Number of generated codes tried before an allocation gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Tuning knobs of the key allocator.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct AllocatorSettings {
    /// Upper bound on generated codes tried per request. Values below 1
    /// are treated as 1.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A request that passed input validation.
#[derive(Debug)]
struct ValidatedRequest {
    target_url: String,
    custom_code: Option<ShortCode>,
    owner_id: String,
    replaces: Option<String>,
}

/// States of a single allocation.
///
/// `Generating -> Checking -> {Created, Generating, Exhausted}`; a taken
/// custom code leaves the machine with an error instead of regenerating.
#[derive(Debug)]
enum Allocation {
    Generating { attempt: u32 },
    Checking { code: ShortCode, attempt: u32 },
    Created(ShortCode),
    Exhausted { attempts: u32 },
}

/// Outcome of trying to write a record under a candidate code.
///
/// A hit on the lookup and a conflict on the insert are the same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Created,
    Taken,
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - URL and custom code validation
/// - Collision handling with a bounded number of generated codes
/// - Best-effort removal of the record a new link supersedes
///
/// Custom codes are never retried: a taken custom code is reported as
/// [`ShortenerError::AliasConflict`]. Storage faults are not retried either;
/// only collisions consume attempts.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: AllocatorSettings,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            settings: self.settings,
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with default settings.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_settings(repository, generator, AllocatorSettings::default())
    }

    /// Creates a new `ShortenerService` with explicit settings.
    pub fn with_settings(repository: R, generator: G, settings: AllocatorSettings) -> Self {
        Self::from_shared(Arc::new(repository), generator, settings)
    }

    /// Creates a new `ShortenerService` over a repository shared with other services.
    pub fn from_shared(repository: Arc<R>, generator: G, settings: AllocatorSettings) -> Self {
        Self {
            repository,
            generator: Arc::new(generator),
            settings,
        }
    }

    /// Validates the request without touching storage.
    ///
    /// The URL is checked before the custom code.
    fn validate(params: ShortenParams) -> Result<ValidatedRequest, ShortenerError> {
        if !is_valid_target_url(&params.target_url) {
            return Err(ShortenerError::InvalidUrl(params.target_url));
        }

        let custom_code = params
            .custom_code
            .filter(|code| !code.is_empty())
            .map(ShortCode::new)
            .transpose()?;

        Ok(ValidatedRequest {
            target_url: params.target_url,
            custom_code,
            owner_id: params.owner_id,
            replaces: params.replaces.filter(|code| !code.is_empty()),
        })
    }

    /// Writes the record under `code` unless the code is already in use.
    async fn claim(
        &self,
        code: &ShortCode,
        request: &ValidatedRequest,
    ) -> Result<Claim, StorageError> {
        if self.repository.exists(code).await? {
            return Ok(Claim::Taken);
        }

        let record = LinkRecord {
            id: code.clone(),
            target_url: request.target_url.clone(),
            owner_id: request.owner_id.clone(),
        };

        match self.repository.insert(record).await {
            Ok(()) => Ok(Claim::Created),
            // Another writer took the code between the lookup and the insert.
            Err(StorageError::Conflict(_)) => Ok(Claim::Taken),
            Err(e) => Err(e),
        }
    }

    async fn allocate(&self, request: &ValidatedRequest) -> Result<ShortCode, ShortenerError> {
        let max_attempts = self.settings.max_attempts.max(1);

        let mut state = match &request.custom_code {
            Some(code) => Allocation::Checking {
                code: code.clone(),
                attempt: 1,
            },
            None => Allocation::Generating { attempt: 1 },
        };

        loop {
            state = match state {
                Allocation::Generating { attempt } if attempt > max_attempts => {
                    Allocation::Exhausted {
                        attempts: max_attempts,
                    }
                }
                Allocation::Generating { attempt } => Allocation::Checking {
                    code: self.generator.generate(),
                    attempt,
                },
                Allocation::Checking { code, attempt } => {
                    let claim = self.claim(&code, request).await.inspect_err(|e| {
                        error!(code = %code, error = %e, "storage failure during allocation");
                    })?;

                    match claim {
                        Claim::Created => Allocation::Created(code),
                        Claim::Taken if request.custom_code.is_some() => {
                            debug!(code = %code, "custom short code is taken");
                            return Err(ShortenerError::AliasConflict(code.to_string()));
                        }
                        Claim::Taken => {
                            debug!(code = %code, attempt, "generated short code is taken, retrying");
                            Allocation::Generating {
                                attempt: attempt + 1,
                            }
                        }
                    }
                }
                Allocation::Created(code) => return Ok(code),
                Allocation::Exhausted { attempts } => {
                    warn!(attempts, "no free short code found, giving up");
                    return Err(ShortenerError::Exhausted { attempts });
                }
            };
        }
    }

    /// Removes the record superseded by a new link. Failures are logged and
    /// otherwise ignored: the new link already exists at this point.
    async fn remove_superseded(&self, replaces: &str, new_code: &ShortCode) {
        if replaces == new_code.as_str() {
            debug!(code = %new_code, "link supersedes itself, skipping cleanup");
            return;
        }

        let Ok(old_code) = ShortCode::new(replaces) else {
            warn!(replaces = %replaces, "superseded short code is malformed, skipping cleanup");
            return;
        };

        match self.repository.delete(&old_code).await {
            Ok(true) => {
                debug!(old = %old_code, new = %new_code, "removed superseded link");
            }
            Ok(false) => {
                debug!(old = %old_code, "superseded link was already gone");
            }
            Err(e) => {
                warn!(old = %old_code, new = %new_code, error = %e, "failed to remove superseded link");
            }
        }
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortCode, ShortenerError> {
        let request = Self::validate(params)?;

        let code = self.allocate(&request).await?;
        info!(
            code = %code,
            owner = %request.owner_id,
            custom = request.custom_code.is_some(),
            "allocated short code"
        );

        if let Some(replaces) = request.replaces.as_deref() {
            self.remove_superseded(replaces, &code).await;
        }

        Ok(code)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<LinkRecord>, ShortenerError> {
        trace!(code = %code, "resolving short code");
        Ok(self.repository.get(code).await?)
    }
}

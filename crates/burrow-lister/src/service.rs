use crate::probe::Prober;
use async_trait::async_trait;
use burrow_core::{ListedLink, Lister, ListerError, ReadRepository};
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, error};
use typed_builder::TypedBuilder;

pub const DEFAULT_PROBE_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, TypedBuilder)]
pub struct ListerSettings {
    /// Maximum number of probes in flight for a single listing.
    #[builder(default = DEFAULT_PROBE_CONCURRENCY)]
    pub concurrency: usize,
}

impl Default for ListerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Lists an owner's links and annotates each with the live status of its
/// target.
///
/// Probes run concurrently, bounded by [`ListerSettings::concurrency`], and
/// the output keeps the repository's order. A probe that fails only marks its
/// own entry as unreachable.
pub struct ListerService<R, P> {
    repository: Arc<R>,
    prober: Arc<P>,
    settings: ListerSettings,
}

impl<R, P> Clone for ListerService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            prober: Arc::clone(&self.prober),
            settings: self.settings.clone(),
        }
    }
}

impl<R: ReadRepository, P: Prober> ListerService<R, P> {
    pub fn new(repository: R, prober: P) -> Self {
        Self::with_settings(repository, prober, ListerSettings::default())
    }

    pub fn with_settings(repository: R, prober: P, settings: ListerSettings) -> Self {
        Self::from_shared(Arc::new(repository), prober, settings)
    }

    /// Builds a lister over a repository that is shared with other services.
    pub fn from_shared(repository: Arc<R>, prober: P, settings: ListerSettings) -> Self {
        Self {
            repository,
            prober: Arc::new(prober),
            settings,
        }
    }
}

#[async_trait]
impl<R: ReadRepository, P: Prober> Lister for ListerService<R, P> {
    async fn list(&self, owner_id: &str) -> Result<Vec<ListedLink>, ListerError> {
        let records = self
            .repository
            .list_by_owner(owner_id)
            .await
            .inspect_err(|e| error!(owner_id = %owner_id, error = %e, "failed to list links"))?;

        debug!(owner_id = %owner_id, count = records.len(), "probing link targets");

        let links = stream::iter(records)
            .map(|record| {
                let prober = Arc::clone(&self.prober);
                async move {
                    let status = prober.probe(&record.target_url).await;
                    ListedLink {
                        target_url: record.target_url,
                        id: record.id,
                        status,
                    }
                }
            })
            .buffered(self.settings.concurrency.max(1))
            .collect()
            .await;

        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::repository::Result as RepoResult;
    use burrow_core::{LinkRecord, LinkStatus, Repository, ShortCode, StorageError};
    use burrow_storage::InMemoryRepository;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers from a fixed table; unknown URLs are unreachable.
    #[derive(Default)]
    struct StubProber {
        answers: HashMap<String, LinkStatus>,
        delay: Duration,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    impl StubProber {
        fn answering(answers: &[(&str, LinkStatus)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(url, status)| (url.to_string(), *status))
                    .collect(),
                ..Default::default()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl Prober for StubProber {
        async fn probe(&self, url: &str) -> LinkStatus {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.answers
                .get(url)
                .copied()
                .unwrap_or(LinkStatus::Unreachable)
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl ReadRepository for FailingRepository {
        async fn get(&self, _code: &ShortCode) -> RepoResult<Option<LinkRecord>> {
            Err(StorageError::Unavailable("down".to_string()))
        }

        async fn exists(&self, _code: &ShortCode) -> RepoResult<bool> {
            Err(StorageError::Unavailable("down".to_string()))
        }

        async fn list_by_owner(&self, _owner_id: &str) -> RepoResult<Vec<LinkRecord>> {
            Err(StorageError::Unavailable("down".to_string()))
        }
    }

    async fn seeded(links: &[(&str, &str, &str)]) -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        for (id, url, owner) in links {
            repo.insert(LinkRecord {
                id: ShortCode::new(*id).unwrap(),
                target_url: url.to_string(),
                owner_id: owner.to_string(),
            })
            .await
            .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn lists_only_the_owners_links_with_their_status() {
        let repo = seeded(&[
            ("aaaa0001", "https://up.example", "alice"),
            ("bbbb0001", "https://gone.example", "alice"),
            ("cccc0001", "https://bob.example", "bob"),
        ])
        .await;
        let prober = StubProber::answering(&[
            ("https://up.example", LinkStatus::Http(200)),
            ("https://gone.example", LinkStatus::Http(404)),
            ("https://bob.example", LinkStatus::Http(200)),
        ]);
        let lister = ListerService::new(repo, prober);

        let links = lister.list("alice").await.unwrap();

        assert_eq!(
            links,
            vec![
                ListedLink {
                    target_url: "https://up.example".to_string(),
                    id: ShortCode::new("aaaa0001").unwrap(),
                    status: LinkStatus::Http(200),
                },
                ListedLink {
                    target_url: "https://gone.example".to_string(),
                    id: ShortCode::new("bbbb0001").unwrap(),
                    status: LinkStatus::Http(404),
                },
            ]
        );
    }

    #[tokio::test]
    async fn unknown_owner_gets_an_empty_list_without_probing() {
        let repo = seeded(&[("aaaa0001", "https://up.example", "alice")]).await;
        let lister = ListerService::new(repo, StubProber::default());

        let links = lister.list("nobody").await.unwrap();

        assert!(links.is_empty());
        assert_eq!(lister.prober.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreachable_target_does_not_abort_the_listing() {
        let repo = seeded(&[
            ("aaaa0001", "https://dead.example", "alice"),
            ("bbbb0001", "https://up.example", "alice"),
        ])
        .await;
        let prober = StubProber::answering(&[("https://up.example", LinkStatus::Http(200))]);
        let lister = ListerService::new(repo, prober);

        let links = lister.list("alice").await.unwrap();

        let statuses: Vec<_> = links.iter().map(|l| l.status.code()).collect();
        assert_eq!(statuses, [0, 200]);
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let lister = ListerService::new(FailingRepository, StubProber::default());

        let err = lister.list("alice").await.unwrap_err();

        assert!(matches!(
            err,
            ListerError::Storage(StorageError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn probes_run_concurrently_up_to_the_limit() {
        let links: Vec<(String, String)> = (0..10)
            .map(|i| (format!("code{i:04}"), format!("https://t{i}.example")))
            .collect();
        let seeds: Vec<(&str, &str, &str)> = links
            .iter()
            .map(|(id, url)| (id.as_str(), url.as_str(), "alice"))
            .collect();
        let repo = seeded(&seeds).await;
        let lister = ListerService::with_settings(
            repo,
            StubProber::slow(Duration::from_millis(50)),
            ListerSettings::builder().concurrency(3).build(),
        );

        let listed = lister.list("alice").await.unwrap();

        assert_eq!(listed.len(), 10);
        assert_eq!(lister.prober.max_in_flight.load(Ordering::SeqCst), 3);
        let ids: Vec<_> = listed.iter().map(|l| l.id.as_str().to_string()).collect();
        let expected: Vec<_> = links.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn shares_a_repository_with_other_services() {
        let repo = Arc::new(InMemoryRepository::new());
        let lister = ListerService::from_shared(
            Arc::clone(&repo),
            StubProber::answering(&[("https://up.example", LinkStatus::Http(204))]),
            ListerSettings::default(),
        );

        repo.insert(LinkRecord {
            id: ShortCode::new("late0001").unwrap(),
            target_url: "https://up.example".to_string(),
            owner_id: "alice".to_string(),
        })
        .await
        .unwrap();

        let links = lister.clone().list("alice").await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].status, LinkStatus::Http(204));
    }
}

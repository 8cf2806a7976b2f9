mod cli;

use crate::cli::{GeneratorArg, StorageBackendArg, CLI};
use anyhow::Context;
use burrow_gateway::{telemetry, App, AppState};
use burrow_generator::{Generator, RandomGenerator, SeqGenerator};
use burrow_lister::{ListerService, ListerSettings, ProbeSettings, ReqwestProber};
use burrow_shortener::{AllocatorSettings, ShortenerService};
use burrow_storage::{InMemoryRepository, MySqlRepository, Repository};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    telemetry::init_tracing(config.log_format).context("failed to install tracing subscriber")?;

    info!(
        listen_addr = %config.listen_addr,
        short_url_base = %config.short_url_base,
        storage_backend = %config.storage,
        generator = %config.generator,
        "starting gateway server"
    );

    let generator = build_generator(&config)?;
    let prober = ReqwestProber::new(
        ProbeSettings::builder()
            .timeout(Duration::from_millis(config.probe_timeout_ms))
            .build(),
    )
    .context("failed to build probe client")?;

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(&config, InMemoryRepository::new(), generator, prober).await
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(mysql_dsn)
                .await
                .context("failed to connect to mysql")?;
            if config.mysql_init_schema {
                repository
                    .ensure_schema()
                    .await
                    .context("failed to create links table")?;
            }
            run_server(&config, repository, generator, prober).await
        }
    }
}

fn build_generator(config: &CLI) -> anyhow::Result<Box<dyn Generator>> {
    let generator: Box<dyn Generator> = match config.generator {
        GeneratorArg::Random => Box::new(RandomGenerator::new()),
        GeneratorArg::Seq => Box::new(
            SeqGenerator::with_prefix(config.generator_prefix.as_str())
                .context("invalid generator prefix")?,
        ),
    };
    Ok(generator)
}

async fn run_server<R: Repository>(
    config: &CLI,
    repository: R,
    generator: Box<dyn Generator>,
    prober: ReqwestProber,
) -> anyhow::Result<()> {
    let repository = Arc::new(repository);

    let shortener = ShortenerService::from_shared(
        Arc::clone(&repository),
        generator,
        AllocatorSettings::builder()
            .max_attempts(config.max_attempts)
            .build(),
    );
    let lister = ListerService::from_shared(
        repository,
        prober,
        ListerSettings::builder()
            .concurrency(config.probe_concurrency)
            .build(),
    );
    let state = AppState::new(
        Arc::new(shortener),
        Arc::new(lister),
        config.short_url_base.as_str(),
    );

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => warn!(error = %e, "failed to listen for ctrl-c, shutting down"),
    }
}

use crate::{Result, TestInfraError};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_PORT: u16 = 3306;

#[derive(Debug, Clone, TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "8.4".to_string(), setter(into))]
    tag: String,
    #[builder(default = "burrow".to_string(), setter(into))]
    database: String,
    #[builder(default = "burrow".to_string(), setter(into))]
    user: String,
    #[builder(default = "burrow".to_string(), setter(into))]
    password: String,
    /// Connection attempts made by [`MySqlServer::pool`].
    #[builder(default = 20)]
    connect_attempts: u32,
    #[builder(default = Duration::from_millis(500))]
    connect_backoff: Duration,
}

/// A throwaway MySQL server with a single application database.
///
/// Dropping it stops and removes the container.
pub struct MySqlServer {
    _container: ContainerAsync<GenericImage>,
    dsn: String,
    config: MysqlConfig,
}

impl MySqlServer {
    pub async fn start(config: MysqlConfig) -> Result<Self> {
        let container = GenericImage::new("mysql", config.tag.as_str())
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.user.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_RANDOM_ROOT_PASSWORD", "yes")
            .start()
            .await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(MYSQL_PORT).await?;
        let dsn = format!(
            "mysql://{}:{}@{}:{}/{}",
            config.user, config.password, host, port, config.database
        );

        Ok(Self {
            _container: container,
            dsn,
            config,
        })
    }

    /// Connection string of the application database.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// Opens a pool on the application database.
    ///
    /// The image restarts once after its first "ready" line, so early
    /// connection failures are retried.
    pub async fn pool(&self) -> Result<MySqlPool> {
        let mut attempt = 1;
        loop {
            match MySqlPoolOptions::new()
                .max_connections(5)
                .connect(&self.dsn)
                .await
            {
                Ok(pool) => return Ok(pool),
                Err(_) if attempt < self.config.connect_attempts => {
                    attempt += 1;
                    tokio::time::sleep(self.config.connect_backoff).await;
                }
                Err(e) => return Err(TestInfraError::Connect(e)),
            }
        }
    }
}

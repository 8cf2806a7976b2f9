use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),
    #[error("failed to connect to test database: {0}")]
    Connect(#[source] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, TestInfraError>;

// src/health/error.rs

#[derive(Debug, thiserror::Error)]
pub enum HealthCheckError {
    #[error("Health check timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Backend unreachable: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid health check URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

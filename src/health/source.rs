// src/health/source.rs
use super::HealthCheckError;
use async_trait::async_trait;
use reqwest::StatusCode;

/// Result of a single probe of the health endpoint.
#[derive(Debug)]
pub enum ProbeOutcome {
    Healthy { status: StatusCode },
    Unhealthy { status: StatusCode },
    Unreachable(HealthCheckError),
}

impl ProbeOutcome {
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            ProbeOutcome::Healthy { status }
        } else {
            ProbeOutcome::Unhealthy { status }
        }
    }

    /// Collapse to the boolean contract; transport failures stay errors.
    pub fn into_result(self) -> Result<bool, HealthCheckError> {
        match self {
            ProbeOutcome::Healthy { .. } => Ok(true),
            ProbeOutcome::Unhealthy { .. } => Ok(false),
            ProbeOutcome::Unreachable(e) => Err(e),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Healthy { .. } => "healthy",
            ProbeOutcome::Unhealthy { .. } => "unhealthy",
            ProbeOutcome::Unreachable(_) => "unreachable",
        }
    }
}

/// Anything the status view can ask about backend health.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn probe(&self) -> ProbeOutcome;

    fn endpoint(&self) -> &str;
}

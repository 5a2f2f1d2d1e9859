// src/health/mod.rs
mod client;
mod error;
mod source;
mod status;

pub use client::{HealthCheckClient, HEALTH_PATH};
pub use error::HealthCheckError;
pub use source::{ProbeOutcome, StatusSource};
pub use status::HealthStatus;

// src/config/models.rs
use anyhow::{bail, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub view: ViewConfig,
    pub metrics: MetricsConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.backend.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}

/// Where the health endpoint lives. The path itself is fixed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            bail!(
                "backend.base_url must use http or https, got {}",
                self.base_url.scheme()
            );
        }
        if self.base_url.host_str().is_none() {
            bail!("backend.base_url must include a host");
        }
        if self.timeout_secs == 0 {
            bail!("backend.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://127.0.0.1:8000").expect("static url"),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub title: String,
    pub subtitle: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: "Super Simple App BoilerPlate".to_string(),
            subtitle: "Here is a cool color".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
    pub path: String,
}

impl MetricsConfig {
    fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            bail!("metrics.path must start with '/', got {:?}", self.path);
        }
        if self.enabled && self.port == 0 {
            bail!("metrics.port must be set when metrics are enabled");
        }
        Ok(())
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9090,
            path: "/metrics".to_string(),
        }
    }
}

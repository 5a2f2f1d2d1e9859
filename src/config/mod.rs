// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .context("Failed to read config file")?;

    let config = parse_config(path, &contents)?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults. Any other
/// read failure is still an error.
pub async fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let config = parse_config(path, &contents)?;
            config.validate()?;
            Ok(config)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config file {} not found, using defaults", path.display());
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
        Err(e) => Err(e).context("Failed to read config file"),
    }
}

fn parse_config(path: &Path, contents: &str) -> Result<Config> {
    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );

    let config = if is_yaml {
        serde_yaml::from_str(contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(contents).context("Failed to parse JSON config")?
    };
    Ok(config)
}

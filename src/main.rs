// src/main.rs
use anyhow::{Context, Result};
use backend_status::{
    config::{self, Config},
    health::HealthCheckClient,
    metrics::{start_metrics_server, MetricsRegistry},
    view::StatusView,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("backend_status=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config_or_default(&config_path).await?;

    run(config).await
}

async fn run(config: Config) -> Result<()> {
    let registry = Arc::new(MetricsRegistry::new()?);
    let metrics_server = if config.metrics.enabled {
        let addr: SocketAddr = ([0, 0, 0, 0], config.metrics.port).into();
        Some(start_metrics_server(
            addr,
            registry.clone(),
            config.metrics.path.clone(),
        )?)
    } else {
        None
    };

    let client = HealthCheckClient::new(&config.backend, Some(registry.collector()))
        .context("Failed to create health check client")?;

    let mut view = StatusView::new(Arc::new(client), config.view.clone());
    println!("{}", view.render());

    view.mount()?;

    tokio::select! {
        settled = view.settled() => {
            let state = settled?;
            info!(phase = ?state.phase, status = %state.status, "Status check settled");
            println!("{}", view.render());
        }
        _ = shutdown_signal() => {
            view.unmount().await;
            return Ok(());
        }
    }

    if let Some(server) = metrics_server {
        info!("Serving metrics until shutdown");
        shutdown_signal().await;
        server.abort();
    }

    view.unmount().await;
    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

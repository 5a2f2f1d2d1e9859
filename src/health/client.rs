// src/health/client.rs
use super::{HealthCheckError, ProbeOutcome, StatusSource};
use crate::config::BackendConfig;
use crate::metrics::MetricsCollector;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tokio::time::{timeout, Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// Fixed path of the backend health endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Issues one GET against `/api/health` per call. No caching, no sharing
/// of in-flight requests.
pub struct HealthCheckClient {
    endpoint: Url,
    timeout: Duration,
    client: Client,
    metrics: Option<Arc<MetricsCollector>>,
}

impl HealthCheckClient {
    pub fn new(
        config: &BackendConfig,
        metrics: Option<Arc<MetricsCollector>>,
    ) -> Result<Self, HealthCheckError> {
        let endpoint = config.base_url.join(HEALTH_PATH)?;
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            endpoint,
            timeout: config.timeout(),
            client,
            metrics,
        })
    }

    /// `Ok(true)` on 2xx, `Ok(false)` on any other status, `Err` when the
    /// backend could not be reached at all.
    pub async fn check_status(&self) -> Result<bool, HealthCheckError> {
        self.probe_endpoint().await.into_result()
    }

    async fn probe_endpoint(&self) -> ProbeOutcome {
        let start = Instant::now();

        let result = timeout(self.timeout, self.client.get(self.endpoint.as_str()).send()).await;

        let outcome = match result {
            Ok(Ok(response)) => ProbeOutcome::from_status(response.status()),
            Ok(Err(e)) => ProbeOutcome::Unreachable(self.classify(e)),
            Err(_) => ProbeOutcome::Unreachable(HealthCheckError::Timeout(self.timeout)),
        };

        let elapsed = start.elapsed();
        match &outcome {
            ProbeOutcome::Healthy { status } | ProbeOutcome::Unhealthy { status } => {
                debug!(endpoint = %self.endpoint, %status, ?elapsed, "health check answered");
            }
            ProbeOutcome::Unreachable(e) => {
                warn!(endpoint = %self.endpoint, error = %e, ?elapsed, "health check failed");
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_probe(&outcome, elapsed);
        }

        outcome
    }

    fn classify(&self, e: reqwest::Error) -> HealthCheckError {
        if e.is_timeout() {
            HealthCheckError::Timeout(self.timeout)
        } else if e.is_connect() {
            HealthCheckError::Connect(e.to_string())
        } else {
            HealthCheckError::Request(e)
        }
    }
}

#[async_trait]
impl StatusSource for HealthCheckClient {
    async fn probe(&self) -> ProbeOutcome {
        self.probe_endpoint().await
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsRegistry;

    fn config_for(base: &str, timeout_secs: u64) -> BackendConfig {
        BackendConfig {
            base_url: Url::parse(base).unwrap(),
            timeout_secs,
        }
    }

    #[test]
    fn endpoint_path_is_fixed() {
        let client = HealthCheckClient::new(&config_for("http://backend.local:8000/app/", 5), None).unwrap();
        assert_eq!(client.endpoint(), "http://backend.local:8000/api/health");
    }

    #[tokio::test]
    async fn success_resolves_true() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", HEALTH_PATH)
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let client = HealthCheckClient::new(&config_for(&server.url(), 5), None).unwrap();
        assert!(client.check_status().await.unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_resolves_false() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", HEALTH_PATH)
            .with_status(500)
            .with_body("{\"status\":\"ok\"}")
            .create_async()
            .await;

        let client = HealthCheckClient::new(&config_for(&server.url(), 5), None).unwrap();
        assert!(!client.check_status().await.unwrap());
    }

    #[tokio::test]
    async fn refused_connection_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HealthCheckClient::new(&config_for(&format!("http://{addr}"), 5), None).unwrap();
        let err = client.check_status().await.unwrap_err();
        assert!(matches!(err, HealthCheckError::Connect(_)), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn stalled_backend_is_a_timeout() {
        use tokio::io::AsyncReadExt;

        // Accepts the connection but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stall = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            while socket.read(&mut buf).await.map(|n| n > 0).unwrap_or(false) {}
        });

        let client = HealthCheckClient::new(&config_for(&format!("http://{addr}"), 1), None).unwrap();
        let err = client.check_status().await.unwrap_err();
        assert!(matches!(err, HealthCheckError::Timeout(_)), "unexpected error: {err:?}");
        stall.abort();
    }

    #[tokio::test]
    async fn probes_are_recorded_in_metrics() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", HEALTH_PATH)
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let registry = MetricsRegistry::new().unwrap();
        let metrics = registry.collector();
        let client =
            HealthCheckClient::new(&config_for(&server.url(), 5), Some(metrics.clone())).unwrap();

        client.probe().await;
        client.probe().await;

        assert_eq!(metrics.probes_total.with_label_values(&["unhealthy"]).get(), 2);
        assert_eq!(metrics.probes_total.with_label_values(&["healthy"]).get(), 0);
        assert_eq!(metrics.backend_up.get(), 0);
    }
}

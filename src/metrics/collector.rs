// src/metrics/collector.rs
use crate::health::ProbeOutcome;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

pub struct MetricsCollector {
    pub probes_total: IntCounterVec,
    pub probe_duration_seconds: Histogram,
    pub backend_up: IntGauge,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let probes_total = IntCounterVec::new(
            Opts::new("status_probes_total", "Health probes by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(probes_total.clone()))?;

        let probe_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "status_probe_duration_seconds",
            "Health probe duration in seconds",
        ))?;
        registry.register(Box::new(probe_duration_seconds.clone()))?;

        let backend_up = IntGauge::new(
            "status_backend_up",
            "Backend health (1=healthy, 0=unhealthy or unreachable, -1=unknown)",
        )?;
        backend_up.set(-1);
        registry.register(Box::new(backend_up.clone()))?;

        Ok(Self {
            probes_total,
            probe_duration_seconds,
            backend_up,
        })
    }

    pub fn record_probe(&self, outcome: &ProbeOutcome, duration: Duration) {
        self.probes_total
            .with_label_values(&[outcome.label()])
            .inc();

        self.probe_duration_seconds.observe(duration.as_secs_f64());

        let up = if matches!(outcome, ProbeOutcome::Healthy { .. }) { 1 } else { 0 };
        self.backend_up.set(up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthCheckError;
    use reqwest::StatusCode;

    #[test]
    fn backend_up_starts_unknown() {
        let registry = MetricsRegistry::new().unwrap();
        assert_eq!(registry.collector().backend_up.get(), -1);
    }

    #[test]
    fn gather_renders_text_format() {
        let registry = MetricsRegistry::new().unwrap();
        let collector = registry.collector();
        collector.record_probe(
            &ProbeOutcome::Healthy { status: StatusCode::OK },
            Duration::from_millis(12),
        );
        collector.record_probe(
            &ProbeOutcome::Unreachable(HealthCheckError::Connect("refused".into())),
            Duration::from_millis(3),
        );

        let text = String::from_utf8(registry.gather().unwrap()).unwrap();
        assert!(text.contains("status_probes_total{outcome=\"healthy\"} 1"));
        assert!(text.contains("status_probes_total{outcome=\"unreachable\"} 1"));
        assert!(text.contains("status_backend_up 0"));
        assert!(text.contains("status_probe_duration_seconds_count 2"));
    }
}

// src/health/status.rs
use std::fmt;

/// Backend health as the view knows it. `Unknown` until a check resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        *self == HealthStatus::Healthy
    }

    /// Badge text. `Unknown` reads the same as `Unhealthy`.
    pub fn label(&self) -> &'static str {
        if self.is_healthy() {
            "Backend Status: Running"
        } else {
            "Backend Status: Not Running"
        }
    }
}

impl From<bool> for HealthStatus {
    fn from(healthy: bool) -> Self {
        if healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthStatus::Unknown => "unknown",
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_renders_as_not_running() {
        assert_eq!(HealthStatus::default(), HealthStatus::Unknown);
        assert_eq!(HealthStatus::Unknown.label(), "Backend Status: Not Running");
        assert_eq!(HealthStatus::Unhealthy.label(), "Backend Status: Not Running");
        assert_eq!(HealthStatus::Healthy.label(), "Backend Status: Running");
    }

    #[test]
    fn only_healthy_is_healthy() {
        assert!(HealthStatus::from(true).is_healthy());
        assert!(!HealthStatus::from(false).is_healthy());
        assert!(!HealthStatus::Unknown.is_healthy());
    }
}

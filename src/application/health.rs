//! Price source availability probing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use serde::Serialize;
use tracing::info;

use crate::domain::{SourceKind, SourceName};
use crate::port::SourceAdapter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

/// Result of probing one source.
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    name: SourceName,
    kind: SourceKind,
    status: HealthStatus,
    latency_ms: u64,
}

impl HealthCheck {
    #[must_use]
    pub fn name(&self) -> &SourceName {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    #[must_use]
    pub fn status(&self) -> &HealthStatus {
        &self.status
    }

    /// How long the probe took, in milliseconds.
    #[must_use]
    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self.status, HealthStatus::Healthy)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    checks: Vec<HealthCheck>,
}

impl HealthReport {
    #[must_use]
    pub fn checks(&self) -> &[HealthCheck] {
        &self.checks
    }

    /// Names of sources that answered the probe positively, in probe order.
    #[must_use]
    pub fn available_names(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| c.is_healthy())
            .map(|c| c.name.to_string())
            .collect()
    }

    #[must_use]
    pub fn available_count(&self) -> usize {
        self.checks.iter().filter(|c| c.is_healthy()).count()
    }

    /// True when at least one source is available.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().any(HealthCheck::is_healthy)
    }
}

/// Probe every source concurrently, each bounded by `timeout`.
///
/// The report keeps the order of `sources`.
pub async fn probe_sources(sources: &[Arc<dyn SourceAdapter>], timeout: Duration) -> HealthReport {
    let probes = sources.iter().map(|source| probe(source.as_ref(), timeout));
    let checks = join_all(probes).await;
    let report = HealthReport { checks };

    info!(
        available = report.available_count(),
        total = report.checks.len(),
        "Source health check complete"
    );

    report
}

async fn probe(source: &dyn SourceAdapter, timeout: Duration) -> HealthCheck {
    let started = Instant::now();
    let status = match tokio::time::timeout(timeout, source.is_available()).await {
        Ok(true) => HealthStatus::Healthy,
        Ok(false) => HealthStatus::Unhealthy("unavailable".to_string()),
        Err(_) => HealthStatus::Unhealthy("timed out".to_string()),
    };

    HealthCheck {
        name: SourceName::from(source.name()),
        kind: source.kind(),
        status,
        latency_ms: super::millis(started.elapsed()),
    }
}

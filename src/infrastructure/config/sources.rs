//! Identifier resolver and price source settings.

use std::time::Duration;

use serde::Deserialize;

/// The `[resolver]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverSettings {
    /// Lifetime of a cached resolution (seconds).
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl ResolverSettings {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// The `[sources]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesSettings {
    /// Names of the sources to query. Empty means every registered source.
    #[serde(default)]
    pub enabled: Vec<String>,
    /// Bound on a single availability probe (milliseconds).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

fn default_probe_timeout_ms() -> u64 {
    5000
}

impl SourcesSettings {
    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for SourcesSettings {
    fn default() -> Self {
        Self {
            enabled: Vec::new(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

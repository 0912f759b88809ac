//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod cache;
pub mod engine;
pub mod fanout;
pub mod health;
pub mod registry;
pub mod resolver;

pub use engine::{EngineConfig, Evaluation, PriceEngine};
pub use health::{probe_sources, HealthCheck, HealthReport, HealthStatus};
pub use registry::SourceRegistry;
pub use resolver::{IdentifierResolver, DEFAULT_CACHE_TTL};

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

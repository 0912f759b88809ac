//! Runtime caches used by application services.
//!
//! - [`identifier::IdentifierCache`]: Resolved per-source identifiers with TTL-based expiry

pub mod identifier;

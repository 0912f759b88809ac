//! Pricegap - cross-venue price aggregation and arbitrage gap detection.
//!
//! Given a token symbol, the engine resolves it to per-source identifiers,
//! queries every enabled price source concurrently under a shared deadline,
//! and reduces whatever answered in time into summary statistics and a
//! ranked list of buy-low/sell-high opportunities.
//!
//! # Architecture
//!
//! - **`domain`** - Quotes, identifiers, statistics and the opportunity
//!   detector. Pure, synchronous, exchange-agnostic.
//! - **`port`** - Traits implemented by external collaborators:
//!   [`port::SourceAdapter`] for venues and [`port::IdentifierLookup`] for
//!   the symbol lookup backend.
//! - **`application`** - The identifier resolver cache, the fan-out
//!   executor, the source registry, health probing and the [`PriceEngine`]
//!   orchestrator.
//! - **`infrastructure`** - TOML configuration and logging setup.
//!
//! # Features
//!
//! - `testkit` - Scripted adapters and in-memory lookups for integration tests.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pricegap::application::{IdentifierResolver, PriceEngine, SourceRegistry};
//! use pricegap::infrastructure::config::Config;
//! # use pricegap::port::IdentifierLookup;
//!
//! # async fn run(lookup: Arc<dyn IdentifierLookup>) -> pricegap::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let registry = SourceRegistry::new();
//! let resolver = IdentifierResolver::new(lookup, config.resolver.cache_ttl());
//! let engine = PriceEngine::new(
//!     resolver,
//!     registry.enabled(&config.sources.enabled),
//!     config.engine_config(),
//! );
//!
//! let evaluation = engine.evaluate("SOL").await?;
//! for opportunity in evaluation.opportunities() {
//!     println!("{opportunity}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use application::PriceEngine;
pub use error::{Error, Result};

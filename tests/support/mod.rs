//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pricegap::application::{EngineConfig, IdentifierResolver, PriceEngine, DEFAULT_CACHE_TTL};
use pricegap::port::SourceAdapter;
use pricegap::testkit::domain::adapters;
use pricegap::testkit::lookup::StaticLookup;
use pricegap::testkit::source::ScriptedSource;

/// Build an engine over scripted sources and a static lookup.
pub fn engine(lookup: StaticLookup, sources: Vec<ScriptedSource>, config: EngineConfig) -> PriceEngine {
    engine_with_lookup(Arc::new(lookup), adapters(sources), config)
}

/// Build an engine keeping a handle on the lookup for call assertions.
pub fn engine_with_lookup(
    lookup: Arc<StaticLookup>,
    sources: Vec<Arc<dyn SourceAdapter>>,
    config: EngineConfig,
) -> PriceEngine {
    let resolver = IdentifierResolver::new(lookup, DEFAULT_CACHE_TTL);
    PriceEngine::new(resolver, sources, config)
}

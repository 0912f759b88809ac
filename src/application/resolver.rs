//! Symbol to per-source identifier resolution with caching.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::cache::identifier::{CacheLookup, IdentifierCache};
use crate::domain::{ResolvedIdentifiers, Symbol};
use crate::error::{LookupError, ResolutionError};
use crate::port::IdentifierLookup;

/// Default lifetime of a cached resolution.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Resolves symbols through an [`IdentifierLookup`], caching successes.
///
/// Concurrent resolves of the same uncached symbol may each hit the backend;
/// the last answer wins the cache slot. When the backend fails for a symbol
/// whose cached entry has expired, the stale entry is served and kept.
pub struct IdentifierResolver {
    lookup: Arc<dyn IdentifierLookup>,
    cache: IdentifierCache,
}

impl IdentifierResolver {
    /// Create a resolver whose cache entries live for `ttl`.
    pub fn new(lookup: Arc<dyn IdentifierLookup>, ttl: Duration) -> Self {
        Self {
            lookup,
            cache: IdentifierCache::new(ttl),
        }
    }

    /// Resolve a symbol to the identifiers of every source that lists it.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::UnknownSymbol`] when the backend does not know the
    /// symbol (or knows no source for it), [`ResolutionError::Backend`] when
    /// the backend call failed. Neither is returned while a stale entry can
    /// be served instead.
    pub async fn resolve(&self, symbol: &str) -> Result<Arc<ResolvedIdentifiers>, ResolutionError> {
        let symbol = Symbol::new(symbol);
        if symbol.is_empty() {
            return Err(ResolutionError::UnknownSymbol {
                symbol: symbol.to_string(),
            });
        }

        let stale = match self.cache.get(&symbol) {
            CacheLookup::Fresh(identifiers) => {
                debug!(symbol = %symbol, "Identifier cache hit");
                return Ok(identifiers);
            }
            CacheLookup::Stale(identifiers) => Some(identifiers),
            CacheLookup::Miss => None,
        };

        let error = match self.lookup.lookup(&symbol).await {
            Ok(map) if !map.is_empty() => {
                let identifiers = Arc::new(ResolvedIdentifiers::new(symbol.clone(), map));
                self.cache.put(Arc::clone(&identifiers));
                debug!(symbol = %symbol, sources = identifiers.len(), "Resolved identifiers");
                return Ok(identifiers);
            }
            Ok(_) | Err(LookupError::NotFound) => ResolutionError::UnknownSymbol {
                symbol: symbol.to_string(),
            },
            Err(LookupError::Backend(reason)) => ResolutionError::Backend {
                symbol: symbol.to_string(),
                reason,
            },
        };

        match stale {
            Some(identifiers) => {
                warn!(symbol = %symbol, error = %error, "Lookup failed, serving stale identifiers");
                Ok(identifiers)
            }
            None => Err(error),
        }
    }

    /// Drop the cached resolution of a symbol.
    pub fn invalidate(&self, symbol: &str) -> bool {
        self.cache.invalidate(&Symbol::new(symbol))
    }

    /// Drop every cached resolution.
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Number of cached resolutions, fresh or stale.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Lifetime of cached resolutions.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.cache.ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceIdentifier;
    use crate::testkit::lookup::StaticLookup;

    fn sol_lookup() -> StaticLookup {
        StaticLookup::new().with_symbol(
            "SOL",
            [
                ("Binance", SourceIdentifier::trading_pair("SOLUSDT")),
                (
                    "Raydium",
                    SourceIdentifier::contract("solana", "So11111111111111111111111111111111111111112", 9),
                ),
            ],
        )
    }

    #[tokio::test]
    async fn test_resolves_and_caches() {
        let lookup = Arc::new(sol_lookup());
        let resolver = IdentifierResolver::new(lookup.clone(), DEFAULT_CACHE_TTL);

        let first = resolver.resolve("sol").await.unwrap();
        let second = resolver.resolve("SOL").await.unwrap();

        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(lookup.calls(), 1);
        assert_eq!(resolver.cached(), 1);
    }

    #[tokio::test]
    async fn test_unknown_symbol() {
        let resolver = IdentifierResolver::new(Arc::new(sol_lookup()), DEFAULT_CACHE_TTL);

        let err = resolver.resolve("DOGE").await.unwrap_err();

        assert_eq!(
            err,
            ResolutionError::UnknownSymbol {
                symbol: "DOGE".into()
            }
        );
        assert_eq!(resolver.cached(), 0);
    }

    #[tokio::test]
    async fn test_blank_symbol_is_unknown_without_lookup() {
        let lookup = Arc::new(sol_lookup());
        let resolver = IdentifierResolver::new(lookup.clone(), DEFAULT_CACHE_TTL);

        assert!(matches!(
            resolver.resolve("  ").await,
            Err(ResolutionError::UnknownSymbol { .. })
        ));
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_mapping_is_unknown() {
        let lookup = StaticLookup::new().with_symbol("NOPE", Vec::<(&str, SourceIdentifier)>::new());
        let resolver = IdentifierResolver::new(Arc::new(lookup), DEFAULT_CACHE_TTL);

        assert!(matches!(
            resolver.resolve("NOPE").await,
            Err(ResolutionError::UnknownSymbol { .. })
        ));
    }

    #[tokio::test]
    async fn test_backend_failure_without_cache() {
        let lookup = sol_lookup();
        lookup.fail_with("rate limited");
        let resolver = IdentifierResolver::new(Arc::new(lookup), DEFAULT_CACHE_TTL);

        let err = resolver.resolve("SOL").await.unwrap_err();

        assert_eq!(
            err,
            ResolutionError::Backend {
                symbol: "SOL".into(),
                reason: "rate limited".into()
            }
        );
    }

    #[tokio::test]
    async fn test_expired_entry_is_refreshed() {
        let lookup = Arc::new(sol_lookup());
        let resolver = IdentifierResolver::new(lookup.clone(), Duration::ZERO);

        resolver.resolve("SOL").await.unwrap();
        resolver.resolve("SOL").await.unwrap();

        assert_eq!(lookup.calls(), 2);
        assert_eq!(resolver.cached(), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_served_when_backend_fails() {
        let lookup = Arc::new(sol_lookup());
        let resolver = IdentifierResolver::new(lookup.clone(), Duration::ZERO);

        let first = resolver.resolve("SOL").await.unwrap();
        lookup.fail_with("503");
        let second = resolver.resolve("SOL").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.cached(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_lookup() {
        let lookup = Arc::new(sol_lookup());
        let resolver = IdentifierResolver::new(lookup.clone(), DEFAULT_CACHE_TTL);

        resolver.resolve("SOL").await.unwrap();
        assert!(resolver.invalidate("sol"));
        resolver.resolve("SOL").await.unwrap();

        assert_eq!(lookup.calls(), 2);
    }
}

//! Thread-safe cache of resolved identifiers with TTL support.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;

use crate::domain::{ResolvedIdentifiers, Symbol};

/// Result of a cache lookup.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    /// Entry younger than the TTL.
    Fresh(Arc<ResolvedIdentifiers>),
    /// Entry exists but has outlived the TTL.
    Stale(Arc<ResolvedIdentifiers>),
    /// No entry for the symbol.
    Miss,
}

#[derive(Debug)]
struct CacheEntry {
    identifiers: Arc<ResolvedIdentifiers>,
    stored_at: Instant,
}

/// Cache of resolved identifiers keyed by normalized symbol.
///
/// Entries are inserted whole under the write lock and handed out as `Arc`
/// snapshots, so a reader never sees a partially built mapping. Expired
/// entries stay in place until the next `put` for the same symbol.
#[derive(Debug)]
pub struct IdentifierCache {
    entries: RwLock<HashMap<Symbol, CacheEntry>>,
    ttl: Duration,
}

impl IdentifierCache {
    /// Create a new cache with the given TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Time-to-live of entries.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a symbol, classifying the entry by age.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> CacheLookup {
        let entries = self.entries.read();
        match entries.get(symbol) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                CacheLookup::Fresh(Arc::clone(&entry.identifiers))
            }
            Some(entry) => CacheLookup::Stale(Arc::clone(&entry.identifiers)),
            None => CacheLookup::Miss,
        }
    }

    /// Insert or replace the entry for the identifiers' symbol.
    pub fn put(&self, identifiers: Arc<ResolvedIdentifiers>) {
        let symbol = identifiers.symbol().clone();
        self.entries.write().insert(
            symbol,
            CacheEntry {
                identifiers,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop the entry for a symbol. Returns true if one existed.
    pub fn invalidate(&self, symbol: &Symbol) -> bool {
        self.entries.write().remove(symbol).is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of entries, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! In-memory [`IdentifierLookup`] for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{IdentifierMap, SourceIdentifier, SourceName, Symbol};
use crate::error::LookupError;
use crate::port::IdentifierLookup;

/// A lookup backed by a fixed table.
///
/// Unknown symbols report [`LookupError::NotFound`]. [`fail_with`] and
/// [`forget_all`] switch every later call to a fixed error until [`recover`]
/// is called.
///
/// [`fail_with`]: StaticLookup::fail_with
/// [`forget_all`]: StaticLookup::forget_all
/// [`recover`]: StaticLookup::recover
#[derive(Debug, Default)]
pub struct StaticLookup {
    table: HashMap<Symbol, IdentifierMap>,
    failure: Mutex<Option<LookupError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the identifiers known for `symbol`.
    pub fn with_symbol<'a>(
        mut self,
        symbol: &str,
        identifiers: impl IntoIterator<Item = (&'a str, SourceIdentifier)>,
    ) -> Self {
        let map: IdentifierMap = identifiers
            .into_iter()
            .map(|(source, identifier)| (SourceName::from(source), identifier))
            .collect();
        self.table.insert(Symbol::new(symbol), map);
        self
    }

    /// Wait `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every later call with a backend error.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock() = Some(LookupError::Backend(reason.into()));
    }

    /// Report every later symbol as not found.
    pub fn forget_all(&self) {
        *self.failure.lock() = Some(LookupError::NotFound);
    }

    /// Answer from the table again.
    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    /// Number of `lookup` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentifierLookup for StaticLookup {
    async fn lookup(&self, symbol: &Symbol) -> Result<IdentifierMap, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        self.table.get(symbol).cloned().ok_or(LookupError::NotFound)
    }
}

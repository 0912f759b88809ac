//! Scripted [`SourceAdapter`] implementation for testing.
//!
//! [`ScriptedSource`] answers every query the same way: a fixed price, a
//! fixed error, a panic, or never. Optional delays exercise the fan-out deadline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Price, SourceIdentifier, SourceKind};
use crate::error::AdapterError;
use crate::port::{SourceAdapter, SourcePrice};

#[derive(Debug, Clone)]
enum Script {
    Price(Price),
    Fail(AdapterError),
    Hang,
    Panic,
}

/// A mock price source with a scripted answer.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    name: String,
    kind: SourceKind,
    network: Option<String>,
    script: Script,
    delay: Option<Duration>,
    available: bool,
    probe_delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(name: impl Into<String>, script: Script) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::OrderBook,
            network: None,
            script,
            delay: None,
            available: true,
            probe_delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answers every query with `price`.
    pub fn priced(name: impl Into<String>, price: Price) -> Self {
        Self::new(name, Script::Price(price))
    }

    /// Fails every query with `error`.
    pub fn failing(name: impl Into<String>, error: AdapterError) -> Self {
        Self::new(name, Script::Fail(error))
    }

    /// Never answers.
    pub fn hanging(name: impl Into<String>) -> Self {
        Self::new(name, Script::Hang)
    }

    /// Panics inside every query.
    pub fn panicking(name: impl Into<String>) -> Self {
        Self::new(name, Script::Panic)
    }

    /// Wait `delay` before answering a query.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_kind(mut self, kind: SourceKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Answer of the liveness probe.
    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Wait `delay` before answering the liveness probe.
    pub fn with_probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = Some(delay);
        self
    }

    /// Shared counter of `query_price` calls.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    async fn query_price(&self, identifier: &SourceIdentifier) -> Result<SourcePrice, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.script {
            Script::Price(price) => Ok(SourcePrice::new(*price, identifier.to_string())),
            Script::Fail(error) => Err(error.clone()),
            Script::Hang => std::future::pending().await,
            Script::Panic => panic!("scripted panic in {}", self.name),
        }
    }

    async fn is_available(&self) -> bool {
        if let Some(delay) = self.probe_delay {
            tokio::time::sleep(delay).await;
        }
        self.available
    }
}

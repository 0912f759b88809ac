//! Price source port.

use async_trait::async_trait;

use crate::domain::{Price, SourceIdentifier, SourceKind};
use crate::error::AdapterError;

/// A price as reported by one venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePrice {
    /// Quoted price in the pair's quote currency.
    pub price: Price,
    /// Human-readable pair, e.g. "SOL/USDC".
    pub pair: String,
}

impl SourcePrice {
    pub fn new(price: Price, pair: impl Into<String>) -> Self {
        Self {
            price,
            pair: pair.into(),
        }
    }
}

/// One price venue.
///
/// Adapters are independent implementations selected by configuration.
/// The fan-out calls [`query_price`](SourceAdapter::query_price) once per
/// round; [`is_available`](SourceAdapter::is_available) is a liveness probe
/// for callers deciding which adapters to enable and is never called during
/// a round.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Unique name of this adapter instance, e.g. "Binance".
    fn name(&self) -> &str;

    /// Venue kind.
    fn kind(&self) -> SourceKind;

    /// Chain the venue lives on. `None` for order-book venues.
    fn network(&self) -> Option<&str> {
        None
    }

    /// Fetch one price for the resolved identifier.
    async fn query_price(&self, identifier: &SourceIdentifier) -> Result<SourcePrice, AdapterError>;

    /// Cheap liveness probe.
    async fn is_available(&self) -> bool;
}

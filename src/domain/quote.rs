//! Quotes and quote sets.
//!
//! A [`Quote`] is one source's answer for one symbol in one fan-out round.
//! Invalid quotes never carry a price; they carry a [`QuoteFailure`] instead
//! so callers can show why a venue is missing from the statistics.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::error::DomainError;
use super::id::SourceName;
use super::money::Price;

/// Kind of venue a source quotes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// On-chain liquidity pool.
    OnChain,
    /// Centralized order-book exchange.
    OrderBook,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnChain => write!(f, "on-chain"),
            Self::OrderBook => write!(f, "order-book"),
        }
    }
}

/// Why a source produced no usable price in a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteFailure {
    /// The round deadline elapsed before the source answered.
    Timeout,
    /// The venue does not list the pair, or no identifier was resolved for it.
    NotListed,
    /// The source answered with a zero or negative price.
    NonPositivePrice,
    /// Network or parse failure inside the adapter.
    Adapter(String),
    /// The query task terminated without an answer.
    Aborted,
}

impl fmt::Display for QuoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out"),
            Self::NotListed => write!(f, "not listed"),
            Self::NonPositivePrice => write!(f, "non-positive price"),
            Self::Adapter(reason) => write!(f, "{reason}"),
            Self::Aborted => write!(f, "query aborted"),
        }
    }
}

impl Serialize for QuoteFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of one source query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteStatus {
    /// A usable, strictly positive price.
    Valid { price: Price },
    /// No usable price.
    Invalid { reason: QuoteFailure },
}

/// One source's answer for one symbol at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    source: SourceName,
    kind: SourceKind,
    network: Option<String>,
    pair: String,
    observed_at: DateTime<Utc>,
    status: QuoteStatus,
}

impl Quote {
    /// Build a quote from a price, observed now.
    ///
    /// A non-positive price yields an invalid quote with
    /// [`QuoteFailure::NonPositivePrice`], so a `Valid` status always
    /// satisfies `price > 0`.
    pub fn priced(
        source: impl Into<SourceName>,
        kind: SourceKind,
        network: Option<String>,
        pair: impl Into<String>,
        price: Price,
    ) -> Self {
        let status = if price > Price::ZERO {
            QuoteStatus::Valid { price }
        } else {
            QuoteStatus::Invalid {
                reason: QuoteFailure::NonPositivePrice,
            }
        };
        Self {
            source: source.into(),
            kind,
            network,
            pair: pair.into(),
            observed_at: Utc::now(),
            status,
        }
    }

    /// Build an invalid quote, observed now.
    pub fn invalid(
        source: impl Into<SourceName>,
        kind: SourceKind,
        network: Option<String>,
        pair: impl Into<String>,
        reason: QuoteFailure,
    ) -> Self {
        Self {
            source: source.into(),
            kind,
            network,
            pair: pair.into(),
            observed_at: Utc::now(),
            status: QuoteStatus::Invalid { reason },
        }
    }

    /// Override the observation time.
    #[must_use]
    pub fn observed_at_time(mut self, at: DateTime<Utc>) -> Self {
        self.observed_at = at;
        self
    }

    #[must_use]
    pub fn source(&self) -> &SourceName {
        &self.source
    }

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    #[must_use]
    pub fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    #[must_use]
    pub fn pair(&self) -> &str {
        &self.pair
    }

    #[must_use]
    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    #[must_use]
    pub fn status(&self) -> &QuoteStatus {
        &self.status
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.status, QuoteStatus::Valid { .. })
    }

    /// The price, present only for valid quotes.
    #[must_use]
    pub fn price(&self) -> Option<Price> {
        match self.status {
            QuoteStatus::Valid { price } => Some(price),
            QuoteStatus::Invalid { .. } => None,
        }
    }

    /// The failure reason, present only for invalid quotes.
    #[must_use]
    pub fn failure(&self) -> Option<&QuoteFailure> {
        match &self.status {
            QuoteStatus::Valid { .. } => None,
            QuoteStatus::Invalid { reason } => Some(reason),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            QuoteStatus::Valid { price } => write!(f, "<{}: ${}>", self.source, price),
            QuoteStatus::Invalid { reason } => write!(f, "<{}: Error - {}>", self.source, reason),
        }
    }
}

/// Flat wire shape of a quote.
#[derive(Serialize)]
struct QuoteRecord<'a> {
    source: &'a SourceName,
    kind: SourceKind,
    network: Option<&'a str>,
    pair: &'a str,
    observed_at: DateTime<Utc>,
    valid: bool,
    price: Option<Price>,
    error: Option<&'a QuoteFailure>,
}

impl Serialize for Quote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        QuoteRecord {
            source: &self.source,
            kind: self.kind,
            network: self.network(),
            pair: &self.pair,
            observed_at: self.observed_at,
            valid: self.is_valid(),
            price: self.price(),
            error: self.failure(),
        }
        .serialize(serializer)
    }
}

/// Ordered quotes for one symbol in one round, at most one per source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuoteSet {
    quotes: Vec<Quote>,
}

impl QuoteSet {
    /// Build a quote set, rejecting duplicate sources.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateSource`] when two quotes share a source name.
    pub fn try_new(quotes: Vec<Quote>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(quotes.len());
        for quote in &quotes {
            if !seen.insert(quote.source.as_str()) {
                return Err(DomainError::DuplicateSource {
                    source_name: quote.source.to_string(),
                });
            }
        }
        Ok(Self { quotes })
    }

    /// All quotes in insertion order.
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Valid quotes only, in insertion order.
    pub fn valid(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.iter().filter(|q| q.is_valid())
    }

    /// Look up the quote of a source.
    #[must_use]
    pub fn get(&self, source: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.source.as_str() == source)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl<'a> IntoIterator for &'a QuoteSet {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn positive_price_is_valid() {
        let quote = Quote::priced("Binance", SourceKind::OrderBook, None, "SOL/USDT", dec!(143.46));
        assert!(quote.is_valid());
        assert_eq!(quote.price(), Some(dec!(143.46)));
        assert!(quote.failure().is_none());
    }

    #[test]
    fn zero_price_becomes_invalid() {
        let quote = Quote::priced("Raydium", SourceKind::OnChain, None, "SOL/USDC", dec!(0));
        assert!(!quote.is_valid());
        assert_eq!(quote.price(), None);
        assert_eq!(quote.failure(), Some(&QuoteFailure::NonPositivePrice));
    }

    #[test]
    fn invalid_quote_has_no_price() {
        let quote = Quote::invalid(
            "Bybit",
            SourceKind::OrderBook,
            None,
            "SOL",
            QuoteFailure::Adapter("503 Service Unavailable".into()),
        );
        assert_eq!(quote.price(), None);
        assert_eq!(quote.to_string(), "<Bybit: Error - 503 Service Unavailable>");
    }

    #[test]
    fn quote_set_rejects_duplicate_sources() {
        let a = Quote::priced("Binance", SourceKind::OrderBook, None, "SOL/USDT", dec!(1));
        let b = Quote::invalid("Binance", SourceKind::OrderBook, None, "SOL", QuoteFailure::Timeout);
        let err = QuoteSet::try_new(vec![a, b]).unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateSource {
                source_name: "Binance".into()
            }
        );
    }

    #[test]
    fn quote_set_preserves_order_and_filters_valid() {
        let set = QuoteSet::try_new(vec![
            Quote::invalid("A", SourceKind::OnChain, Some("ethereum".into()), "X", QuoteFailure::Timeout),
            Quote::priced("B", SourceKind::OrderBook, None, "X/USDT", dec!(2)),
            Quote::priced("C", SourceKind::OrderBook, None, "X/USDT", dec!(3)),
        ])
        .unwrap();

        let names: Vec<_> = set.quotes().iter().map(|q| q.source().as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(set.valid().count(), 2);
        assert_eq!(set.get("A").and_then(|q| q.network()), Some("ethereum"));
    }

    #[test]
    fn quote_serializes_as_flat_record() {
        let quote = Quote::invalid("Raydium", SourceKind::OnChain, Some("solana".into()), "SOL", QuoteFailure::Timeout);
        let json = serde_json::to_value(&quote).unwrap();

        assert_eq!(json["source"], "Raydium");
        assert_eq!(json["kind"], "on_chain");
        assert_eq!(json["network"], "solana");
        assert_eq!(json["valid"], false);
        assert!(json["price"].is_null());
        assert_eq!(json["error"], "timed out");
    }
}

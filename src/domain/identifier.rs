//! Per-source identifiers resolved for a symbol.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::{SourceName, Symbol};

/// What a single source needs to quote a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceIdentifier {
    /// Token contract on a chain, for on-chain pools.
    Contract {
        network: String,
        address: String,
        decimals: u8,
    },
    /// Venue trading-pair string, for order-book exchanges.
    TradingPair { pair: String },
}

impl SourceIdentifier {
    /// Contract identifier on `network`.
    pub fn contract(network: impl Into<String>, address: impl Into<String>, decimals: u8) -> Self {
        Self::Contract {
            network: network.into(),
            address: address.into(),
            decimals,
        }
    }

    /// Trading-pair identifier, e.g. `"SOLUSDT"`.
    pub fn trading_pair(pair: impl Into<String>) -> Self {
        Self::TradingPair { pair: pair.into() }
    }
}

impl fmt::Display for SourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contract {
                network, address, ..
            } => write!(f, "{network}:{address}"),
            Self::TradingPair { pair } => write!(f, "{pair}"),
        }
    }
}

/// Mapping from source name to identifier, as produced by a lookup backend.
pub type IdentifierMap = BTreeMap<SourceName, SourceIdentifier>;

/// Identifiers resolved for one symbol.
///
/// Immutable once built; the resolver shares it behind an `Arc` and replaces
/// it wholesale when it expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIdentifiers {
    symbol: Symbol,
    identifiers: IdentifierMap,
    resolved_at: DateTime<Utc>,
}

impl ResolvedIdentifiers {
    pub fn new(symbol: Symbol, identifiers: IdentifierMap) -> Self {
        Self {
            symbol,
            identifiers,
            resolved_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Identifier for one source, if the token is known there.
    #[must_use]
    pub fn get(&self, source: &str) -> Option<&SourceIdentifier> {
        self.identifiers.get(source)
    }

    #[must_use]
    pub fn identifiers(&self) -> &IdentifierMap {
        &self.identifiers
    }

    #[must_use]
    pub fn resolved_at(&self) -> DateTime<Utc> {
        self.resolved_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_source_name() {
        let mut map = IdentifierMap::new();
        map.insert("Binance".into(), SourceIdentifier::trading_pair("SOLUSDT"));
        map.insert(
            "Raydium".into(),
            SourceIdentifier::contract("solana", "So11111111111111111111111111111111111111112", 9),
        );
        let resolved = ResolvedIdentifiers::new(Symbol::new("sol"), map);

        assert_eq!(resolved.symbol().as_str(), "SOL");
        assert_eq!(resolved.len(), 2);
        assert_eq!(
            resolved.get("Binance"),
            Some(&SourceIdentifier::trading_pair("SOLUSDT"))
        );
        assert!(resolved.get("Bybit").is_none());
    }

    #[test]
    fn identifier_display() {
        assert_eq!(SourceIdentifier::trading_pair("SOLUSDT").to_string(), "SOLUSDT");
        assert_eq!(
            SourceIdentifier::contract("bsc", "0xabc", 18).to_string(),
            "bsc:0xabc"
        );
    }
}

//! Builders for domain primitives and canned venue sets used across tests.

use std::sync::Arc;

use rust_decimal_macros::dec;

use super::lookup::StaticLookup;
use super::source::ScriptedSource;
use crate::domain::{IdentifierMap, ResolvedIdentifiers, SourceIdentifier, SourceKind, Symbol};
use crate::port::SourceAdapter;

/// Names of the five venues in [`five_venues`], in registration order.
pub const FIVE_VENUES: [&str; 5] = ["Binance", "Bybit", "Raydium", "UniswapV3", "PancakeSwapV2"];

/// Erase a list of scripted sources into adapter handles.
pub fn adapters(sources: Vec<ScriptedSource>) -> Vec<Arc<dyn SourceAdapter>> {
    sources
        .into_iter()
        .map(|s| Arc::new(s) as Arc<dyn SourceAdapter>)
        .collect()
}

/// Resolved identifiers giving every named source the same trading pair.
pub fn identifiers(symbol: &str, sources: &[&str]) -> ResolvedIdentifiers {
    let map: IdentifierMap = sources
        .iter()
        .map(|s| ((*s).into(), SourceIdentifier::trading_pair(format!("{symbol}USDT"))))
        .collect();
    ResolvedIdentifiers::new(Symbol::new(symbol), map)
}

/// Lookup knowing SOL on all five venues.
pub fn sol_lookup() -> StaticLookup {
    StaticLookup::new().with_symbol(
        "SOL",
        [
            ("Binance", SourceIdentifier::trading_pair("SOLUSDT")),
            ("Bybit", SourceIdentifier::trading_pair("SOLUSDT")),
            (
                "Raydium",
                SourceIdentifier::contract("solana", "So11111111111111111111111111111111111111112", 9),
            ),
            (
                "UniswapV3",
                SourceIdentifier::contract("ethereum", "0xD31a59c85aE9D8edEFeC411D448f90841571b89c", 9),
            ),
            (
                "PancakeSwapV2",
                SourceIdentifier::contract("bsc", "0x570A5D26f7765Ecb712C0924E4De545B89fD43dF", 18),
            ),
        ],
    )
}

/// Two order books and three on-chain pools quoting SOL between 141.23
/// and 143.46.
pub fn five_venues() -> Vec<ScriptedSource> {
    vec![
        ScriptedSource::priced("Binance", dec!(143.46)),
        ScriptedSource::priced("Bybit", dec!(143.12)),
        ScriptedSource::priced("Raydium", dec!(142.89))
            .with_kind(SourceKind::OnChain)
            .with_network("solana"),
        ScriptedSource::priced("UniswapV3", dec!(141.67))
            .with_kind(SourceKind::OnChain)
            .with_network("ethereum"),
        ScriptedSource::priced("PancakeSwapV2", dec!(141.23))
            .with_kind(SourceKind::OnChain)
            .with_network("bsc"),
    ]
}

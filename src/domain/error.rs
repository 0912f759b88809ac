//! Domain validation errors for core domain types.
//!
//! Returned by `try_new` constructors when a domain invariant would be
//! violated.
//!
//! # Examples
//!
//! ```
//! use pricegap::domain::error::DomainError;
//! use pricegap::domain::{Quote, QuoteFailure, QuoteSet, SourceKind};
//!
//! let quote = Quote::invalid("Binance", SourceKind::OrderBook, None, "SOL", QuoteFailure::Timeout);
//! let result = QuoteSet::try_new(vec![quote.clone(), quote]);
//!
//! assert!(matches!(result, Err(DomainError::DuplicateSource { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A quote set may hold at most one quote per source.
    #[error("duplicate quote for source '{source_name}'")]
    DuplicateSource {
        /// The source that appeared twice.
        source_name: String,
    },
}

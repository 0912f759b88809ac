//! Exchange-agnostic domain logic.

mod detector;
mod id;
mod identifier;
mod money;
mod opportunity;
mod quote;
mod stats;

pub mod error;

// Core domain types
pub use id::{SourceName, Symbol};
pub use identifier::{IdentifierMap, ResolvedIdentifiers, SourceIdentifier};
pub use money::{percent_change, Percent, Price};
pub use opportunity::Opportunity;
pub use quote::{Quote, QuoteFailure, QuoteSet, QuoteStatus, SourceKind};

// Aggregation and detection
pub use detector::detect;
pub use stats::{summarize, PriceSummary, Statistics};

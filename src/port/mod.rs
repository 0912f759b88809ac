//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the narrow interfaces through which the engine talks to the
//! outside world. Concrete venues and lookup services live outside this
//! crate and implement these traits.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       PriceEngine        │
//!                 │  resolve ─► fan-out ─►   │
//!                 │  summarize + detect      │
//!                 └────────────┬─────────────┘
//!                ┌─────────────┴──────────────┐
//!                ▼                            ▼
//!      ┌──────────────────┐         ┌──────────────────┐
//!      │ IdentifierLookup │         │ SourceAdapter xN │
//!      └──────────────────┘         └──────────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`SourceAdapter`] - One price venue (on-chain pool or order book)
//! - [`IdentifierLookup`] - Symbol to per-source identifier backend

mod lookup;
mod source;

pub use lookup::IdentifierLookup;
pub use source::{SourceAdapter, SourcePrice};

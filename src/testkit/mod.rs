//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - [`ScriptedSource`](source::ScriptedSource), a mock
//!   [`SourceAdapter`](crate::port::SourceAdapter) with a fixed answer.
//! - [`lookup`] - [`StaticLookup`](lookup::StaticLookup), an in-memory
//!   [`IdentifierLookup`](crate::port::IdentifierLookup).
//! - [`domain`] - Builders for identifiers and canned venue sets.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod lookup;
pub mod source;

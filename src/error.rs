use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failure of a single source adapter.
///
/// Local to one venue: the fan-out turns it into an invalid quote and it
/// never reaches the caller of an evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("pair not listed on venue")]
    NotListed,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure reported by an identifier lookup backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("symbol not found")]
    NotFound,

    #[error("lookup backend failed: {0}")]
    Backend(String),
}

/// Symbol resolution errors. Abort the evaluation before any venue is queried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("unknown symbol '{symbol}'")]
    UnknownSymbol { symbol: String },

    #[error("lookup for '{symbol}' failed: {reason}")]
    Backend { symbol: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("resolving '{symbol}' exceeded its {budget:?} budget")]
    ResolutionTimeout { symbol: String, budget: Duration },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

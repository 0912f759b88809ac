//! Identifier lookup port.

use async_trait::async_trait;

use crate::domain::{IdentifierMap, Symbol};
use crate::error::LookupError;

/// Backend that maps a token symbol to the identifiers each source needs.
///
/// Implementations apply their own retry policy; the resolver calls
/// `lookup` once per cache miss and caches successful answers.
#[async_trait]
pub trait IdentifierLookup: Send + Sync {
    /// Resolve `symbol` (already normalized to upper case).
    ///
    /// Returns [`LookupError::NotFound`] when the backend does not know the
    /// symbol and [`LookupError::Backend`] when the backend itself failed.
    async fn lookup(&self, symbol: &Symbol) -> Result<IdentifierMap, LookupError>;
}

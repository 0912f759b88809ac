//! Registry of price source adapters.

use std::sync::Arc;

use tracing::warn;

use crate::error::{Error, Result};
use crate::port::SourceAdapter;

/// The set of adapter instances built once at startup.
///
/// Names are unique within a registry. Adapters keep their registration
/// order, which is also the order of quotes in every round.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn SourceAdapter>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] when an adapter with the same name is
    /// already registered.
    pub fn register(&mut self, source: Arc<dyn SourceAdapter>) -> Result<()> {
        if self.get(source.name()).is_some() {
            return Err(Error::InvalidConfiguration(format!(
                "price source '{}' registered twice",
                source.name()
            )));
        }
        self.sources.push(source);
        Ok(())
    }

    /// Look up an adapter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn SourceAdapter>> {
        self.sources.iter().find(|s| s.name() == name)
    }

    /// All registered adapters.
    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn SourceAdapter>] {
        &self.sources
    }

    /// Adapters named in `enabled`, in registration order.
    ///
    /// An empty list enables every adapter. Names matching no adapter are
    /// logged and ignored. Matching is case-insensitive.
    #[must_use]
    pub fn enabled(&self, enabled: &[String]) -> Vec<Arc<dyn SourceAdapter>> {
        if enabled.is_empty() {
            return self.sources.clone();
        }

        for name in enabled {
            if !self.sources.iter().any(|s| s.name().eq_ignore_ascii_case(name)) {
                warn!(source = %name, "Enabled price source is not registered");
            }
        }

        self.sources
            .iter()
            .filter(|s| enabled.iter().any(|n| n.eq_ignore_ascii_case(s.name())))
            .cloned()
            .collect()
    }

    /// Number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::source::ScriptedSource;
    use rust_decimal_macros::dec;

    fn registry(names: &[&str]) -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        for name in names {
            registry
                .register(Arc::new(ScriptedSource::priced(*name, dec!(1))))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = registry(&["Binance"]);
        let result = registry.register(Arc::new(ScriptedSource::priced("Binance", dec!(2))));

        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_enabled_list_selects_all() {
        let registry = registry(&["Binance", "Bybit"]);
        assert_eq!(registry.enabled(&[]).len(), 2);
    }

    #[test]
    fn test_enabled_keeps_registration_order() {
        let registry = registry(&["Binance", "Bybit", "Raydium"]);

        let enabled = registry.enabled(&["raydium".to_string(), "Binance".to_string(), "Kraken".to_string()]);

        let names: Vec<_> = enabled.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["Binance", "Raydium"]);
    }

    #[test]
    fn test_get_by_name() {
        let registry = registry(&["Binance"]);
        assert!(registry.get("Binance").is_some());
        assert!(registry.get("Bybit").is_none());
        assert!(!registry.is_empty());
    }
}

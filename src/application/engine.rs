//! Price engine: one request/response cycle per symbol.
//!
//! [`PriceEngine::evaluate`] resolves the symbol, fans out to every enabled
//! source under the round deadline, then summarizes the quotes and detects
//! opportunities over the same set.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{info, warn};

use super::fanout;
use super::resolver::IdentifierResolver;
use crate::domain::{detect, summarize, Opportunity, Percent, QuoteSet, Statistics, Symbol};
use crate::error::{Error, Result};
use crate::port::SourceAdapter;

/// Engine timing and threshold settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Upper bound on one fan-out round.
    pub round_deadline: Duration,
    /// Upper bound on a whole evaluation.
    pub call_deadline: Duration,
    /// Fraction of `call_deadline` granted to symbol resolution.
    pub resolution_share: f64,
    /// Fraction of `call_deadline` granted to the fan-out.
    pub fanout_share: f64,
    /// Minimum profit, in percent, for a pair to be reported.
    pub min_profit_percent: Percent,
}

impl EngineConfig {
    /// Check the shares and threshold.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] when a share is not in `(0, 1]` or the
    /// profit threshold is negative.
    pub fn validate(&self) -> Result<()> {
        for (field, share) in [
            ("resolution_share", self.resolution_share),
            ("fanout_share", self.fanout_share),
        ] {
            if !(share > 0.0 && share <= 1.0) {
                return Err(Error::InvalidConfiguration(format!(
                    "{field} must be in (0, 1], got {share}"
                )));
            }
        }
        if self.min_profit_percent < Decimal::ZERO {
            return Err(Error::InvalidConfiguration(format!(
                "min_profit_percent must be 0 or greater, got {}",
                self.min_profit_percent
            )));
        }
        Ok(())
    }

    /// Time allowed for resolution. Zero when the share is not a valid
    /// fraction.
    #[must_use]
    pub fn resolution_budget(&self) -> Duration {
        share_of(self.call_deadline, self.resolution_share)
    }

    /// Time allowed for the fan-out: the round deadline, capped by the
    /// fan-out share of the call deadline.
    #[must_use]
    pub fn round_budget(&self) -> Duration {
        self.round_deadline
            .min(share_of(self.call_deadline, self.fanout_share))
    }
}

fn share_of(deadline: Duration, share: f64) -> Duration {
    Duration::try_from_secs_f64(deadline.as_secs_f64() * share).unwrap_or(Duration::ZERO)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            round_deadline: Duration::from_secs(5),
            call_deadline: Duration::from_secs(10),
            resolution_share: 0.3,
            fanout_share: 0.7,
            min_profit_percent: dec!(0.5),
        }
    }
}

/// Combined result of one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    symbol: Symbol,
    quotes: QuoteSet,
    statistics: Statistics,
    opportunities: Vec<Opportunity>,
    evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    #[must_use]
    pub fn quotes(&self) -> &QuoteSet {
        &self.quotes
    }

    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Opportunities, most profitable first.
    #[must_use]
    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    /// The most profitable opportunity, if any.
    #[must_use]
    pub fn best_opportunity(&self) -> Option<&Opportunity> {
        self.opportunities.first()
    }

    #[must_use]
    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    /// Serialize as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Public entry point wiring resolver, fan-out, aggregation and detection.
pub struct PriceEngine {
    resolver: Arc<IdentifierResolver>,
    sources: Vec<Arc<dyn SourceAdapter>>,
    config: EngineConfig,
}

impl PriceEngine {
    /// Create an engine over an explicit set of enabled sources.
    pub fn new(
        resolver: impl Into<Arc<IdentifierResolver>>,
        sources: Vec<Arc<dyn SourceAdapter>>,
        config: EngineConfig,
    ) -> Self {
        Self {
            resolver: resolver.into(),
            sources,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn resolver(&self) -> &IdentifierResolver {
        &self.resolver
    }

    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn SourceAdapter>] {
        &self.sources
    }

    /// Evaluate one symbol across every enabled source.
    ///
    /// A round where no source answers is still a success, with no price
    /// data and no opportunities.
    ///
    /// # Errors
    ///
    /// - [`Error::Resolution`] when the symbol cannot be resolved
    /// - [`Error::ResolutionTimeout`] when resolution exceeds its budget
    /// - [`Error::InvalidConfiguration`] when no source is enabled, the
    ///   round budget is zero, or [`EngineConfig::validate`] fails
    pub async fn evaluate(&self, symbol: &str) -> Result<Evaluation> {
        self.config.validate()?;
        let budget = self.config.resolution_budget();
        let identifiers = match tokio::time::timeout(budget, self.resolver.resolve(symbol)).await {
            Ok(resolved) => resolved?,
            Err(_) => {
                let symbol = Symbol::new(symbol);
                warn!(symbol = %symbol, budget_ms = super::millis(budget), "Resolution timed out");
                return Err(Error::ResolutionTimeout {
                    symbol: symbol.to_string(),
                    budget,
                });
            }
        };

        let quotes = fanout::run(&self.sources, &identifiers, self.config.round_budget()).await?;
        let statistics = summarize(&quotes);
        let opportunities = detect(&quotes, self.config.min_profit_percent);

        info!(
            symbol = %identifiers.symbol(),
            valid = statistics.valid_count,
            total = statistics.total_count,
            spread_percent = %statistics.spread_percent().unwrap_or(Decimal::ZERO).round_dp(2),
            opportunities = opportunities.len(),
            "Evaluated symbol"
        );

        Ok(Evaluation {
            symbol: identifiers.symbol().clone(),
            quotes,
            statistics,
            opportunities,
            evaluated_at: Utc::now(),
        })
    }

    /// Evaluate several symbols concurrently.
    ///
    /// Each symbol runs its own evaluation with its own deadlines; one
    /// failure does not affect the others. Results follow input order.
    pub async fn evaluate_many<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<(String, Result<Evaluation>)> {
        let evaluations = symbols.iter().map(|symbol| async move {
            let symbol = symbol.as_ref();
            let result = self.evaluate(symbol).await;
            if let Err(e) = &result {
                warn!(symbol, error = %e, "Evaluation failed");
            }
            (symbol.to_string(), result)
        });
        join_all(evaluations).await
    }
}

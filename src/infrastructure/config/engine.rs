//! Engine timing and detection settings.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The `[engine]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Upper bound on one fan-out round (milliseconds).
    #[serde(default = "default_round_deadline_ms")]
    pub round_deadline_ms: u64,
    /// Upper bound on a whole evaluation (milliseconds).
    #[serde(default = "default_call_deadline_ms")]
    pub call_deadline_ms: u64,
    /// Share of the call deadline given to symbol resolution.
    #[serde(default = "default_resolution_share")]
    pub resolution_share: f64,
    /// Share of the call deadline given to the fan-out.
    #[serde(default = "default_fanout_share")]
    pub fanout_share: f64,
    /// Minimum profit percentage reported as an opportunity.
    #[serde(default = "default_min_profit_percent")]
    pub min_profit_percent: Decimal,
}

fn default_round_deadline_ms() -> u64 {
    5000
}

fn default_call_deadline_ms() -> u64 {
    10000
}

fn default_resolution_share() -> f64 {
    0.3
}

fn default_fanout_share() -> f64 {
    0.7
}

fn default_min_profit_percent() -> Decimal {
    dec!(0.5)
}

impl EngineSettings {
    #[must_use]
    pub fn round_deadline(&self) -> Duration {
        Duration::from_millis(self.round_deadline_ms)
    }

    #[must_use]
    pub fn call_deadline(&self) -> Duration {
        Duration::from_millis(self.call_deadline_ms)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            round_deadline_ms: default_round_deadline_ms(),
            call_deadline_ms: default_call_deadline_ms(),
            resolution_share: default_resolution_share(),
            fanout_share: default_fanout_share(),
            min_profit_percent: default_min_profit_percent(),
        }
    }
}

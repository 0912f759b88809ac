//! Canonical test configurations.

use std::time::Duration;

use rust_decimal_macros::dec;

use crate::application::EngineConfig;

/// Engine config with short deadlines: 200ms rounds, 60ms resolution.
pub fn engine() -> EngineConfig {
    EngineConfig {
        round_deadline: Duration::from_millis(200),
        call_deadline: Duration::from_millis(200),
        resolution_share: 0.3,
        fanout_share: 1.0,
        min_profit_percent: dec!(0.5),
    }
}

/// [`engine`] with a different profit threshold.
pub fn engine_with_threshold(min_profit_percent: rust_decimal::Decimal) -> EngineConfig {
    EngineConfig {
        min_profit_percent,
        ..engine()
    }
}

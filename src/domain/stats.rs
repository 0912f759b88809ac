//! Aggregate statistics over a quote set.

use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{percent_change, Percent, Price};
use super::quote::QuoteSet;

/// Price summary over the valid quotes of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceSummary {
    pub avg_price: Price,
    pub min_price: Price,
    pub max_price: Price,
    /// `(max - min) / min * 100`. `None` when the gap is too large to
    /// represent.
    pub spread_percent: Option<Percent>,
}

/// Statistics for one round.
///
/// The price summary is `None` when no quote is valid: absence of data is
/// never reported as a zero price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_count: usize,
    pub valid_count: usize,
    pub error_count: usize,
    pub prices: Option<PriceSummary>,
}

impl Statistics {
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.prices.is_some()
    }

    #[must_use]
    pub fn avg_price(&self) -> Option<Price> {
        self.prices.map(|p| p.avg_price)
    }

    #[must_use]
    pub fn min_price(&self) -> Option<Price> {
        self.prices.map(|p| p.min_price)
    }

    #[must_use]
    pub fn max_price(&self) -> Option<Price> {
        self.prices.map(|p| p.max_price)
    }

    #[must_use]
    pub fn spread_percent(&self) -> Option<Percent> {
        self.prices.and_then(|p| p.spread_percent)
    }
}

/// Summarize the valid quotes of a set. Mean is unweighted.
#[must_use]
pub fn summarize(quotes: &QuoteSet) -> Statistics {
    let prices: Vec<Price> = quotes.valid().filter_map(|q| q.price()).collect();
    let total_count = quotes.len();
    let valid_count = prices.len();

    let summary = match (prices.iter().min(), prices.iter().max()) {
        (Some(&min_price), Some(&max_price)) => {
            let avg_price = mean(&prices).unwrap_or(max_price);
            let spread_percent = percent_change(min_price, max_price);
            Some(PriceSummary {
                avg_price,
                min_price,
                max_price,
                spread_percent,
            })
        }
        _ => None,
    };

    Statistics {
        total_count,
        valid_count,
        error_count: total_count - valid_count,
        prices: summary,
    }
}

/// Arithmetic mean of a non-empty slice.
///
/// Sums exactly when the total fits; otherwise falls back to a running mean,
/// which stays within `[min, max]` of the inputs.
fn mean(prices: &[Price]) -> Option<Price> {
    let count = Decimal::from(prices.len());
    if let Some(sum) = prices
        .iter()
        .try_fold(Decimal::ZERO, |acc, price| acc.checked_add(*price))
    {
        return sum.checked_div(count);
    }

    prices
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |avg, (i, price)| {
            let delta = price.checked_sub(avg)?.checked_div(Decimal::from(i + 1))?;
            avg.checked_add(delta)
        })
}

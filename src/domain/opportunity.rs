//! Cross-venue arbitrage opportunity.

use std::fmt;

use serde::Serialize;

use super::id::SourceName;
use super::money::{percent_change, Percent, Price};

/// Buy on the cheaper venue, sell on the dearer one.
///
/// Built only through [`Opportunity::between`], which enforces
/// `buy_price < sell_price` and distinct sources, so `profit_percent` is
/// always strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunity {
    buy_source: SourceName,
    sell_source: SourceName,
    buy_price: Price,
    sell_price: Price,
    profit_percent: Percent,
}

impl Opportunity {
    /// Pair two priced sources, putting the lower price on the buy side.
    ///
    /// Returns `None` when the sources are the same, either price is not
    /// positive, or the prices are equal (no gap to trade).
    pub fn between(
        a: (&SourceName, Price),
        b: (&SourceName, Price),
    ) -> Option<Self> {
        let ((buy_source, buy_price), (sell_source, sell_price)) =
            if a.1 <= b.1 { (a, b) } else { (b, a) };

        if buy_source == sell_source || buy_price <= Price::ZERO || buy_price == sell_price {
            return None;
        }

        let profit_percent = percent_change(buy_price, sell_price)?;

        Some(Self {
            buy_source: buy_source.clone(),
            sell_source: sell_source.clone(),
            buy_price,
            sell_price,
            profit_percent,
        })
    }

    #[must_use]
    pub fn buy_source(&self) -> &SourceName {
        &self.buy_source
    }

    #[must_use]
    pub fn sell_source(&self) -> &SourceName {
        &self.sell_source
    }

    #[must_use]
    pub fn buy_price(&self) -> Price {
        self.buy_price
    }

    #[must_use]
    pub fn sell_price(&self) -> Price {
        self.sell_price
    }

    /// `(sell - buy) / buy * 100`.
    #[must_use]
    pub fn profit_percent(&self) -> Percent {
        self.profit_percent
    }
}

impl fmt::Display for Opportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Buy on {} at ${:.6}, Sell on {} at ${:.6} (+{:.2}%)",
            self.buy_source, self.buy_price, self.sell_source, self.sell_price, self.profit_percent
        )
    }
}

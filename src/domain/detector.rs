//! Cross-venue arbitrage detection.

use std::cmp::Ordering;

use super::money::Percent;
use super::opportunity::Opportunity;
use super::quote::QuoteSet;

/// Enumerate every pair of valid quotes whose gap reaches `min_profit_percent`.
///
/// Quadratic in the number of valid quotes, which is bounded by the number
/// of configured sources. A venue may appear in several opportunities. Pairs
/// with equal prices never qualify, even with a zero threshold.
///
/// The result is sorted by profit descending, then buy source, then sell
/// source, so identical input always yields identical output.
#[must_use]
pub fn detect(quotes: &QuoteSet, min_profit_percent: Percent) -> Vec<Opportunity> {
    let priced: Vec<_> = quotes
        .valid()
        .filter_map(|q| q.price().map(|price| (q.source(), price)))
        .collect();

    let mut opportunities = Vec::new();
    for (i, &a) in priced.iter().enumerate() {
        for &b in &priced[i + 1..] {
            if let Some(opp) = Opportunity::between(a, b) {
                if opp.profit_percent() >= min_profit_percent {
                    opportunities.push(opp);
                }
            }
        }
    }

    opportunities.sort_by(rank);
    opportunities
}

fn rank(a: &Opportunity, b: &Opportunity) -> Ordering {
    b.profit_percent()
        .cmp(&a.profit_percent())
        .then_with(|| a.buy_source().cmp(b.buy_source()))
        .then_with(|| a.sell_source().cmp(b.sell_source()))
}

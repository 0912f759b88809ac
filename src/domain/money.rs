//! Monetary types for price representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Percentage value (1.5 means 1.5%).
pub type Percent = Decimal;

/// Relative gap from `base` to `other`, in percent.
///
/// Returns `None` when `base` is zero, where the ratio is undefined, or when
/// the result does not fit in a `Decimal`.
#[must_use]
pub fn percent_change(base: Price, other: Price) -> Option<Percent> {
    if base.is_zero() {
        return None;
    }
    other
        .checked_sub(base)?
        .checked_div(base)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

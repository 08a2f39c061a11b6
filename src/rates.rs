//! Fixed conversion-rate table.
//!
//! The table is intentionally not reciprocal (usd→rub is 90 while
//! rub→usd is 0.011, so a round trip loses value). That asymmetry is
//! the business rule, not a bug to normalize away.

use model::entities::account::Currency;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Multiplicative factor for an ordered currency pair. `None` only for
/// same-currency pairs, which are rejected before rates are consulted.
pub fn rate(from: Currency, to: Currency) -> Option<Decimal> {
    use Currency::*;

    let rate = match (from, to) {
        (Usd, Rub) => Decimal::new(90, 0),
        (Usd, Eur) => Decimal::new(8, 1),
        (Eur, Rub) => Decimal::new(110, 0),
        (Eur, Usd) => Decimal::new(12, 1),
        (Rub, Eur) => Decimal::new(91, 4),
        (Rub, Usd) => Decimal::new(11, 3),
        _ => return None,
    };

    Some(rate)
}

/// Converts `amount` minor units of `from` into minor units of `to`,
/// rounding halves away from zero to the nearest integer unit.
pub fn convert_amount(from: Currency, to: Currency, amount: i64) -> Option<i64> {
    let rate = rate(from, to)?;

    (Decimal::from(amount) * rate)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

//! Wire/domain money conversion.
//!
//! The backend carries prices as plain decimal numbers in major units; the
//! domain carries them as minor-unit [`Price`] values. Conversions round to
//! the currency's minor-unit precision, midpoint away from zero.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::ToPrimitive,
};
use rusty_money::Money;
use tricto::{CURRENCY, Price};

/// Convert a wire amount in major units into a [`Price`].
///
/// Returns `None` when the amount is not finite or does not fit minor units.
pub(crate) fn price_from_major(amount: f64) -> Option<Price> {
    let amount = Decimal::from_f64_retain(amount)?;

    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()?;

    Some(Money::from_minor(minor, CURRENCY))
}

/// Convert a [`Price`] back into a wire amount in major units.
///
/// Returns `None` when the amount has no `f64` representation, mirroring
/// [`price_from_major`]; a silent fallback here would put a wrong price on
/// the wire.
pub(crate) fn price_to_major(price: Price) -> Option<f64> {
    let minor = Decimal::from(price.to_minor_units());

    (minor / Decimal::ONE_HUNDRED).to_f64()
}

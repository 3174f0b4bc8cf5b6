//! Pricing
//!
//! Resolves the price a shopper pays for one unit of a product, given the
//! product's base price and an optionally selected discount slot. Resolution
//! happens exactly once, when the unit enters the cart; the result is frozen
//! into the cart line and never recomputed, so later slot changes cannot
//! retroactively reprice lines already in the cart.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::ToPrimitive,
};
use rusty_money::Money;
use thiserror::Error;

use crate::{Price, slots::Slot};

/// Errors that can occur while resolving a unit price.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The slot carried a discount percentage outside `[0, 100]`. This is a
    /// data integrity fault from the slot service, not a case to clamp.
    #[error("discount percentage {0} is outside 0-100")]
    InvalidDiscountPercentage(Decimal),

    /// The discounted amount could not be represented in minor units.
    #[error("discounted amount overflowed minor units")]
    AmountConversion,
}

/// Resolve the unit price for a base price and an optionally selected slot.
///
/// With no slot the base price is returned unchanged (regular-price path).
/// With a slot the price is `base * (1 - discount / 100)`, rounded to the
/// currency's minor-unit precision with midpoints away from zero.
///
/// # Errors
///
/// - [`PricingError::InvalidDiscountPercentage`]: the slot's discount is
///   outside `[0, 100]`.
/// - [`PricingError::AmountConversion`]: the discounted amount cannot be
///   represented in minor units.
pub fn resolve_unit_price(base: Price, slot: Option<&Slot>) -> Result<Price, PricingError> {
    let Some(slot) = slot else {
        return Ok(base);
    };

    let discount = slot.discount_percentage;

    if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(PricingError::InvalidDiscountPercentage(discount));
    }

    let factor = (Decimal::ONE_HUNDRED - discount) / Decimal::ONE_HUNDRED;
    let base_minor = Decimal::from(base.to_minor_units());

    let discounted = base_minor
        .checked_mul(factor)
        .ok_or(PricingError::AmountConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let minor = discounted.to_i64().ok_or(PricingError::AmountConversion)?;

    Ok(Money::from_minor(minor, base.currency()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        CURRENCY,
        catalog::ProductId,
        slots::SlotId,
    };

    fn slot_with_discount(discount: Decimal) -> Slot {
        Slot {
            id: SlotId::from_i32(1),
            product: ProductId::from_i32(1),
            max_capacity: 100,
            current_fill: 10,
            discount_percentage: discount,
            is_full: false,
        }
    }

    #[test]
    fn no_slot_returns_base_unchanged() -> TestResult {
        let base = Money::from_minor(123_45, CURRENCY);

        assert_eq!(resolve_unit_price(base, None)?, base);

        Ok(())
    }

    #[test]
    fn quarter_discount_on_round_price() -> TestResult {
        let base = Money::from_minor(200_00, CURRENCY);
        let slot = slot_with_discount(Decimal::from(25));

        let resolved = resolve_unit_price(base, Some(&slot))?;

        assert_eq!(resolved, Money::from_minor(150_00, CURRENCY));

        Ok(())
    }

    #[test]
    fn zero_discount_keeps_price() -> TestResult {
        let base = Money::from_minor(99_99, CURRENCY);
        let slot = slot_with_discount(Decimal::ZERO);

        let resolved = resolve_unit_price(base, Some(&slot))?;

        assert_eq!(resolved, Money::from_minor(99_99, CURRENCY));

        Ok(())
    }

    #[test]
    fn fractional_result_rounds_to_minor_units() -> TestResult {
        // 10% off 33.33 is 29.997, which rounds up to 30.00.
        let base = Money::from_minor(33_33, CURRENCY);
        let slot = slot_with_discount(Decimal::from(10));

        let resolved = resolve_unit_price(base, Some(&slot))?;

        assert_eq!(resolved, Money::from_minor(30_00, CURRENCY));

        Ok(())
    }

    #[test]
    fn full_discount_resolves_to_zero() -> TestResult {
        let base = Money::from_minor(50_00, CURRENCY);
        let slot = slot_with_discount(Decimal::ONE_HUNDRED);

        let resolved = resolve_unit_price(base, Some(&slot))?;

        assert_eq!(resolved, Money::from_minor(0, CURRENCY));

        Ok(())
    }

    #[test]
    fn negative_discount_is_rejected() {
        let base = Money::from_minor(100_00, CURRENCY);
        let slot = slot_with_discount(Decimal::from(-5));

        let result = resolve_unit_price(base, Some(&slot));

        assert!(matches!(
            result,
            Err(PricingError::InvalidDiscountPercentage(_))
        ));
    }

    #[test]
    fn discount_above_hundred_is_rejected() {
        let base = Money::from_minor(100_00, CURRENCY);
        let slot = slot_with_discount(Decimal::from(150));

        let result = resolve_unit_price(base, Some(&slot));

        assert!(matches!(
            result,
            Err(PricingError::InvalidDiscountPercentage(_))
        ));
    }
}

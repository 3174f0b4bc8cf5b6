//! Cart
//!
//! The cart is a small state machine with two states: `Open`, where lines may
//! be mutated freely, and `Submitting`, which covers the asynchronous window
//! while an order is in flight. Every mutating operation checks the state
//! first; while `Submitting`, mutations are guaranteed no-ops rather than
//! errors, so stray UI events during checkout cannot corrupt the order being
//! placed and cannot surface transient-lock noise either. Callers that need
//! rejection feedback must inspect [`Cart::is_submitting`] themselves.
//!
//! Entering checkout snapshots and optimistically clears the lines; the
//! snapshot is the typed rollback payload used to restore the cart when order
//! placement fails.

use rusty_money::{Money, MoneyError};
use thiserror::Error;

use crate::{CURRENCY, Price, catalog::ProductId, slots::SlotId};

/// Errors that can occur while totalling the cart.
#[derive(Debug, Error)]
pub enum SubtotalError {
    /// A line total overflowed minor units.
    #[error("line total overflowed minor units")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A single cart entry.
///
/// The unit price was resolved against the selected slot when the line was
/// added and is frozen from then on; slot or catalog changes never reprice an
/// existing line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product this line refers to.
    pub product: ProductId,

    /// Display name captured at add time.
    pub name: String,

    /// Image URL captured at add time.
    pub image: Option<String>,

    /// Frozen discount-resolved price for one unit.
    pub unit_price: Price,

    /// Units of the product, always at least 1.
    pub quantity: u32,

    /// Slot the shopper selected when adding, `None` for regular price.
    pub slot: Option<SlotId>,
}

/// Payload for adding a line to the cart.
#[derive(Debug, Clone)]
pub struct NewCartLine {
    /// Product being added.
    pub product: ProductId,

    /// Display name to capture.
    pub name: String,

    /// Image URL to capture.
    pub image: Option<String>,

    /// Already-resolved unit price to freeze into the line.
    pub unit_price: Price,

    /// Requested quantity; values below 1 are treated as 1.
    pub quantity: u32,

    /// Selected slot, `None` for a regular-price purchase.
    pub slot: Option<SlotId>,
}

/// Cart lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CartState {
    /// Mutations allowed.
    #[default]
    Open,

    /// An order submission is in flight; mutations are silently rejected.
    Submitting,
}

/// The lines captured when checkout began, used to rebuild the cart if order
/// placement fails.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    /// The captured lines, in their pre-checkout display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Slot carried by the first captured line, if any. Order submission
    /// sends this as the order's tier.
    pub fn selected_slot(&self) -> Option<SlotId> {
        self.lines.first().and_then(|line| line.slot)
    }
}

/// Outcome of an order submission, fed back into the cart to leave
/// `Submitting`.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// The order was placed; the optimistically cleared cart stays empty.
    Success,

    /// Placement failed; restore the snapshot into the cart.
    Failure(CartSnapshot),
}

/// The shopper's cart: insertion-ordered lines plus the lifecycle state.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    state: CartState,
}

impl Cart {
    /// Create an empty, open cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (not units).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether an order submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state == CartState::Submitting
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CartState {
        self.state
    }

    /// Add a line, merging on product id.
    ///
    /// If a line for the same product already exists its quantity grows by
    /// the requested amount and everything else about it, including the
    /// frozen price and selected slot, is kept. No-op while `Submitting`.
    pub fn add_line(&mut self, line: NewCartLine) {
        if self.is_submitting() {
            return;
        }

        self.merge_line(line);
    }

    /// Remove the line for a product. No-op while `Submitting`.
    pub fn remove_line(&mut self, product: ProductId) {
        if self.is_submitting() {
            return;
        }

        self.lines.retain(|line| line.product != product);
    }

    /// Set a line's quantity, clamped to a minimum of 1.
    ///
    /// Removal is always the explicit [`Cart::remove_line`] operation, never
    /// a zero quantity. No-op while `Submitting` or when the product has no
    /// line.
    pub fn update_quantity(&mut self, product: ProductId, quantity: u32) {
        if self.is_submitting() {
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.product == product) {
            line.quantity = quantity.max(1);
        }
    }

    /// Empty the cart regardless of state.
    ///
    /// This deliberately bypasses the `Submitting` check: it is the
    /// optimistic-clear step of entering checkout as well as the ordinary
    /// "empty my cart" operation.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Enter `Submitting`: snapshot the lines, optimistically clear them,
    /// and hand the snapshot to the caller as the rollback payload.
    ///
    /// Returns `None` when a submission is already in flight.
    pub fn begin_checkout(&mut self) -> Option<CartSnapshot> {
        if self.is_submitting() {
            return None;
        }

        let snapshot = CartSnapshot {
            lines: self.lines.clone(),
        };

        self.lines.clear();
        self.state = CartState::Submitting;

        Some(snapshot)
    }

    /// Leave `Submitting` with the outcome of the order submission.
    ///
    /// On failure the snapshot is restored line by line through the usual
    /// merge semantics; since checkout cleared the cart, this reconstructs
    /// the pre-checkout lines faithfully. Runs on every submission path,
    /// success or failure.
    pub fn end_checkout(&mut self, outcome: CheckoutOutcome) {
        self.state = CartState::Open;

        if let CheckoutOutcome::Failure(snapshot) = outcome {
            for line in snapshot.lines {
                self.merge_line(NewCartLine {
                    product: line.product,
                    name: line.name,
                    image: line.image,
                    unit_price: line.unit_price,
                    quantity: line.quantity,
                    slot: line.slot,
                });
            }
        }
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// # Errors
    ///
    /// - [`SubtotalError::Overflow`]: a line total overflowed minor units.
    /// - [`SubtotalError::Money`]: wrapped money arithmetic error.
    pub fn subtotal(&self) -> Result<Price, SubtotalError> {
        self.lines
            .iter()
            .try_fold(Money::from_minor(0, CURRENCY), |acc, line| {
                let minor = line
                    .unit_price
                    .to_minor_units()
                    .checked_mul(i64::from(line.quantity))
                    .ok_or(SubtotalError::Overflow)?;

                acc.add(Money::from_minor(minor, line.unit_price.currency()))
                    .map_err(SubtotalError::from)
            })
    }

    fn merge_line(&mut self, line: NewCartLine) {
        let requested = line.quantity.max(1);

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|existing| existing.product == line.product)
        {
            // Same product merges into the existing line at its frozen price,
            // even when the incoming line selected a different slot.
            existing.quantity = existing.quantity.saturating_add(requested);
        } else {
            self.lines.push(CartLine {
                product: line.product,
                name: line.name,
                image: line.image,
                unit_price: line.unit_price,
                quantity: requested,
                slot: line.slot,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::{
        pricing::resolve_unit_price,
        slots::Slot,
    };

    fn line(product: i32, price_minor: i64, quantity: u32) -> NewCartLine {
        NewCartLine {
            product: ProductId::from_i32(product),
            name: format!("Product {product}"),
            image: None,
            unit_price: Money::from_minor(price_minor, CURRENCY),
            quantity,
            slot: None,
        }
    }

    #[test]
    fn add_line_inserts_in_display_order() {
        let mut cart = Cart::new();

        cart.add_line(line(1, 100_00, 1));
        cart.add_line(line(2, 50_00, 1));

        let products: Vec<_> = cart.lines().iter().map(|l| l.product).collect();
        assert_eq!(
            products,
            vec![ProductId::from_i32(1), ProductId::from_i32(2)]
        );
    }

    #[test]
    fn adding_same_product_merges_quantities() {
        let mut cart = Cart::new();

        cart.add_line(line(1, 100_00, 2));
        cart.add_line(line(1, 100_00, 3));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn merge_keeps_existing_frozen_price_and_slot() {
        let mut cart = Cart::new();

        cart.add_line(NewCartLine {
            slot: Some(SlotId::from_i32(9)),
            ..line(1, 75_00, 1)
        });

        // Second add for the same product at a different price and slot.
        cart.add_line(NewCartLine {
            slot: Some(SlotId::from_i32(4)),
            ..line(1, 60_00, 1)
        });

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].unit_price, Money::from_minor(75_00, CURRENCY));
        assert_eq!(cart.lines()[0].slot, Some(SlotId::from_i32(9)));
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn zero_quantity_add_is_treated_as_one() {
        let mut cart = Cart::new();

        cart.add_line(line(1, 10_00, 0));

        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn update_quantity_clamps_to_one() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 10_00, 5));

        cart.update_quantity(ProductId::from_i32(1), 0);

        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn remove_line_drops_only_that_product() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 10_00, 1));
        cart.add_line(line(2, 20_00, 1));

        cart.remove_line(ProductId::from_i32(1));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product, ProductId::from_i32(2));
    }

    #[test]
    fn mutations_are_noops_while_submitting() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 10_00, 2));

        let _snapshot = cart.begin_checkout();
        assert!(cart.is_submitting());
        assert!(cart.is_empty());

        cart.add_line(line(2, 20_00, 1));
        cart.update_quantity(ProductId::from_i32(1), 7);
        cart.remove_line(ProductId::from_i32(1));

        assert!(cart.is_empty(), "mutations must not land while submitting");
    }

    #[test]
    fn clear_bypasses_the_submitting_check() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 10_00, 1));

        let snapshot = cart.begin_checkout();
        assert!(snapshot.is_some());

        // Already empty from the optimistic clear, but clear must stay legal.
        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.is_submitting());
    }

    #[test]
    fn begin_checkout_while_submitting_returns_none() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 10_00, 1));

        let first = cart.begin_checkout();
        let second = cart.begin_checkout();

        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[test]
    fn successful_checkout_leaves_cart_empty_and_open() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 50_00, 2));

        let snapshot = cart.begin_checkout();
        assert!(snapshot.is_some());

        cart.end_checkout(CheckoutOutcome::Success);

        assert!(cart.is_empty());
        assert!(!cart.is_submitting());
    }

    #[test]
    fn failed_checkout_restores_the_snapshot() -> TestResult {
        let mut cart = Cart::new();
        cart.add_line(line(1, 30_00, 1));
        cart.add_line(line(2, 45_50, 3));

        let before: Vec<_> = cart.lines().to_vec();

        let snapshot = cart.begin_checkout().ok_or("checkout should begin")?;
        assert!(cart.is_empty());

        cart.end_checkout(CheckoutOutcome::Failure(snapshot));

        assert_eq!(cart.lines(), before.as_slice());
        assert!(!cart.is_submitting());

        Ok(())
    }

    #[test]
    fn snapshot_reports_first_line_slot() {
        let mut cart = Cart::new();
        cart.add_line(NewCartLine {
            slot: Some(SlotId::from_i32(3)),
            ..line(1, 10_00, 1)
        });
        cart.add_line(line(2, 20_00, 1));

        let snapshot = cart.begin_checkout();

        assert_eq!(
            snapshot.and_then(|s| s.selected_slot()),
            Some(SlotId::from_i32(3))
        );
    }

    #[test]
    fn line_price_is_frozen_against_slot_changes() -> TestResult {
        let mut slot = Slot {
            id: SlotId::from_i32(1),
            product: ProductId::from_i32(1),
            max_capacity: 100,
            current_fill: 10,
            discount_percentage: Decimal::from(25),
            is_full: false,
        };

        let base = Money::from_minor(200_00, CURRENCY);
        let resolved = resolve_unit_price(base, Some(&slot))?;

        let mut cart = Cart::new();
        cart.add_line(NewCartLine {
            unit_price: resolved,
            slot: Some(slot.id),
            ..line(1, 0, 1)
        });

        // The tier's discount changes after the line was added.
        slot.discount_percentage = Decimal::from(50);
        let repriced = resolve_unit_price(base, Some(&slot))?;

        assert_ne!(repriced, resolved);
        assert_eq!(cart.lines()[0].unit_price, Money::from_minor(150_00, CURRENCY));

        Ok(())
    }

    #[test]
    fn subtotal_multiplies_by_quantity() -> TestResult {
        let mut cart = Cart::new();
        cart.add_line(line(1, 50_00, 2));
        cart.add_line(line(2, 10_25, 3));

        assert_eq!(cart.subtotal()?, Money::from_minor(130_75, CURRENCY));

        Ok(())
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() -> TestResult {
        let cart = Cart::new();

        assert_eq!(cart.subtotal()?, Money::from_minor(0, CURRENCY));

        Ok(())
    }
}

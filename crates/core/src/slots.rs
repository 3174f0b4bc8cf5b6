//! Slots
//!
//! A slot is a capacity-limited discount tier attached to a product: shoppers
//! join it, and once enough have joined the percentage discount unlocks. The
//! backend owns slot capacity enforcement; everything here is an advisory
//! classification over whatever state the server last reported, including
//! states where the counters and the `is_full` flag disagree.

use rust_decimal::Decimal;

use crate::{catalog::ProductId, ids::TypedId};

/// Slot identifier.
pub type SlotId = TypedId<Slot>;

/// How close to capacity a slot must be (in remaining seats) before it is
/// reported as near-full.
pub const NEAR_FULL_WINDOW: i32 = 5;

/// A discount tier for a single product.
#[derive(Debug, Clone)]
pub struct Slot {
    /// Backend identifier.
    pub id: SlotId,

    /// Product this tier belongs to.
    pub product: ProductId,

    /// Seats available in the tier.
    pub max_capacity: i32,

    /// Seats currently taken. May lag behind `is_full` under eventual
    /// consistency; `is_full` wins for purchasability.
    pub current_fill: i32,

    /// Percentage off the base price once the tier unlocks, nominally 0-100.
    pub discount_percentage: Decimal,

    /// Authoritative full marker set by the backend.
    pub is_full: bool,
}

/// Presentation/selectability classification of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// No seats left; the tier is not selectable.
    Full,

    /// Within [`NEAR_FULL_WINDOW`] seats of capacity.
    NearFull,

    /// Open with room to spare.
    Active,
}

impl Slot {
    /// Whether a shopper may still select this tier.
    ///
    /// The `is_full` flag is authoritative even when the counters claim
    /// otherwise.
    pub fn is_purchasable(&self) -> bool {
        !self.is_full
    }

    /// Whether the tier is within [`NEAR_FULL_WINDOW`] seats of filling up.
    ///
    /// Derived, never persisted. A full slot is not near-full.
    pub fn is_near_full(&self) -> bool {
        !self.is_full && self.current_fill >= self.max_capacity - NEAR_FULL_WINDOW
    }

    /// Fraction of the tier already taken, clamped to `[0, 1]`.
    ///
    /// A non-positive capacity is reported as fully taken rather than
    /// dividing by zero.
    pub fn fill_ratio(&self) -> f64 {
        if self.max_capacity <= 0 {
            return 1.0;
        }

        (f64::from(self.current_fill) / f64::from(self.max_capacity)).min(1.0)
    }

    /// Classify the slot for presentation and selectability.
    ///
    /// `Full` takes precedence regardless of the counters, then `NearFull`,
    /// then `Active`.
    pub fn status(&self) -> SlotStatus {
        if self.is_full {
            SlotStatus::Full
        } else if self.is_near_full() {
            SlotStatus::NearFull
        } else {
            SlotStatus::Active
        }
    }
}

//! Orders
//!
//! Submission records built from a cart snapshot at the moment checkout
//! begins. Items are copies, deliberately decoupled from live product and
//! slot state: a price or tier change after submission can never alter what
//! the shopper ordered.

use crate::{
    Price,
    cart::CartSnapshot,
    catalog::ProductId,
    ids::TypedId,
    slots::SlotId,
};

/// Marker type for user identifiers.
#[derive(Debug)]
pub struct User;

/// User identifier.
pub type UserId = TypedId<User>;

/// Slot id the backend treats as "no tier selected" (regular-price purchase).
pub const REGULAR_PRICE_SLOT: SlotId = SlotId::from_i32(1);

/// One ordered line, snapshotted at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// Product that was ordered.
    pub product: ProductId,

    /// Display name at submission time.
    pub name: String,

    /// Frozen unit price the shopper paid.
    pub unit_price: Price,

    /// Units ordered.
    pub quantity: u32,

    /// Image URL captured with the line.
    pub image: Option<String>,
}

/// An order ready for submission.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Shopper placing the order.
    pub user: UserId,

    /// Selected tier, or [`REGULAR_PRICE_SLOT`] when none was chosen.
    pub slot: SlotId,

    /// Snapshotted line items.
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    /// Build a submission from the snapshot taken when checkout began.
    ///
    /// The order's tier is the first snapshotted line's selected slot, or
    /// the regular-price sentinel when no line carried one.
    pub fn from_snapshot(user: UserId, snapshot: &CartSnapshot) -> Self {
        let items = snapshot
            .lines()
            .iter()
            .map(|line| OrderItem {
                product: line.product,
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                image: line.image.clone(),
            })
            .collect();

        Self {
            user,
            slot: snapshot.selected_slot().unwrap_or(REGULAR_PRICE_SLOT),
            items,
        }
    }
}

/// An order as returned by the order history endpoint.
#[derive(Debug, Clone)]
pub struct Order {
    /// Shopper who placed the order.
    pub user: UserId,

    /// Tier the order was placed under.
    pub slot: SlotId,

    /// Snapshotted line items.
    pub items: Vec<OrderItem>,

    /// Backend-reported status, when present.
    pub status: Option<String>,
}

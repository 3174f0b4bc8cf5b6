//! Tricto
//!
//! Tricto is the domain core of a crowd-funded-discount storefront: products
//! can be bought at their regular price or through a capacity-limited discount
//! "slot" that unlocks a percentage off once enough buyers join. This crate
//! holds the slot model, the pricing resolver, and the cart state machine;
//! all network collaborators live in the application crate.

pub mod cart;
pub mod catalog;
pub mod ids;
pub mod orders;
pub mod pricing;
pub mod slots;

use rusty_money::{Money, iso};

/// Currency every price in the storefront is denominated in.
pub const CURRENCY: &iso::Currency = iso::INR;

/// A price in the storefront currency.
pub type Price = Money<'static, iso::Currency>;

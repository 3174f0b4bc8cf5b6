//! Shared cart handle.
//!
//! Wraps the domain cart in a mutex so the UI layer and the checkout flow
//! can mutate it from anywhere. All cart rules live in the domain type;
//! this handle only adds sharing.

use std::sync::{Arc, Mutex, PoisonError};

use tricto::{
    cart::{Cart, CartLine, CartSnapshot, CheckoutOutcome, NewCartLine, SubtotalError},
    catalog::ProductId,
    Price,
};

#[derive(Debug, Clone, Default)]
pub struct CartHandle {
    inner: Arc<Mutex<Cart>>,
}

impl CartHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut cart = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    pub fn add_line(&self, line: NewCartLine) {
        self.with(|cart| cart.add_line(line));
    }

    pub fn remove_line(&self, product: ProductId) {
        self.with(|cart| cart.remove_line(product));
    }

    pub fn update_quantity(&self, product: ProductId, quantity: u32) {
        self.with(|cart| cart.update_quantity(product, quantity));
    }

    pub fn clear(&self) {
        self.with(Cart::clear);
    }

    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.with(|cart| cart.lines().to_vec())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.with(|cart| cart.is_empty())
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.with(|cart| cart.is_submitting())
    }

    /// Sum of unit price times quantity over every line.
    ///
    /// # Errors
    ///
    /// Returns an error when the total overflows the currency's minor-unit
    /// range.
    pub fn subtotal(&self) -> Result<Price, SubtotalError> {
        self.with(|cart| cart.subtotal())
    }

    pub(crate) fn begin_checkout(&self) -> Option<CartSnapshot> {
        self.with(Cart::begin_checkout)
    }

    pub(crate) fn end_checkout(&self, outcome: CheckoutOutcome) {
        self.with(|cart| cart.end_checkout(outcome));
    }
}

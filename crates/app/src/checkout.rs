//! Order submission flow.
//!
//! Submitting an order is a small saga: snapshot and clear the cart
//! optimistically, persist the delivery address on a best-effort basis,
//! place the order, and on failure put every snapshotted line back exactly
//! as it was. The address call never aborts the order; the backend accepts
//! orders without one.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tricto::{cart::CheckoutOutcome, orders::NewOrder};

use crate::{
    auth::session::SessionHandle,
    cart::CartHandle,
    domain::{
        address::{AddressService, NewAddress},
        orders::{OrderReceipt, OrderService, OrderServiceError},
    },
};

/// Where the most recent submission attempt ended up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Delivery address captured at checkout.
#[derive(Debug, Clone)]
pub struct AddressForm {
    pub address_line: String,
    pub pincode: String,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("please login to place an order")]
    NotAuthenticated,

    #[error("the cart is empty")]
    EmptyCart,

    #[error("an order submission is already in progress")]
    SubmissionInProgress,

    #[error("order placement failed")]
    OrderPlacement(#[source] OrderServiceError),
}

/// Coordinates cart, session and remote services for one submission.
#[derive(Clone)]
pub struct Checkout {
    cart: CartHandle,
    session: SessionHandle,
    orders: Arc<dyn OrderService>,
    address: Arc<dyn AddressService>,
    phase: Arc<Mutex<CheckoutPhase>>,
}

impl Checkout {
    #[must_use]
    pub fn new(
        cart: CartHandle,
        session: SessionHandle,
        orders: Arc<dyn OrderService>,
        address: Arc<dyn AddressService>,
    ) -> Self {
        Self {
            cart,
            session,
            orders,
            address,
            phase: Arc::new(Mutex::new(CheckoutPhase::Idle)),
        }
    }

    fn set_phase(&self, next: CheckoutPhase) {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        *phase = next;
    }

    /// The most recent submission outcome.
    #[must_use]
    pub fn phase(&self) -> CheckoutPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submit the cart as an order.
    ///
    /// The cart is cleared before the order call goes out and restored line
    /// for line when the call fails, so the shopper never loses their
    /// selection to a transient error.
    ///
    /// # Errors
    ///
    /// Returns an error when no session is signed in, the cart is empty,
    /// a submission is already in flight, or order placement is rejected.
    pub async fn submit(&self, form: AddressForm) -> Result<OrderReceipt, CheckoutError> {
        let Some(session) = self.session.current() else {
            return Err(CheckoutError::NotAuthenticated);
        };

        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let Some(snapshot) = self.cart.begin_checkout() else {
            return Err(CheckoutError::SubmissionInProgress);
        };

        self.set_phase(CheckoutPhase::Submitting);

        let address = NewAddress {
            address_line: form.address_line,
            pincode: form.pincode,
            user: session.id,
        };
        if let Err(error) = self.address.save_address(session.bearer(), &address).await {
            tracing::warn!(%error, "address save failed; continuing with order placement");
        }

        let order = NewOrder::from_snapshot(session.id, &snapshot);

        match self.orders.place_order(session.bearer(), &order).await {
            Ok(receipt) => {
                self.cart.end_checkout(CheckoutOutcome::Success);
                self.set_phase(CheckoutPhase::Succeeded);
                Ok(receipt)
            }
            Err(error) => {
                self.cart.end_checkout(CheckoutOutcome::Failure(snapshot));
                self.set_phase(CheckoutPhase::Failed);
                Err(CheckoutError::OrderPlacement(error))
            }
        }
    }
}

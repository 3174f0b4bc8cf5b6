//! Application wiring.
//!
//! `AppContext` builds every service against one HTTP client, restores any
//! persisted session, and hands the UI layer a single cloneable object to
//! reach the whole application through.

use std::sync::Arc;

use tricto::{catalog::ProductId, orders::Order, slots::Slot};

use crate::{
    auth::{errors::SessionError, service::HttpAuthService, session::SessionHandle},
    cart::CartHandle,
    checkout::Checkout,
    domain::{
        address::{AddressService, HttpAddressService},
        catalog::{CatalogService, HttpCatalogService},
        orders::{HttpOrderService, OrderService, OrderServiceError},
        slots::{slots_or_empty, HttpSlotService, SlotService, SlotServiceError},
    },
    http::HttpClient,
    storage::SessionStore,
};

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub slots: Arc<dyn SlotService>,
    pub orders: Arc<dyn OrderService>,
    pub address: Arc<dyn AddressService>,
    pub session: SessionHandle,
    pub cart: CartHandle,
    pub checkout: Checkout,
}

impl AppContext {
    /// Wire every service against `base_url` and rehydrate the persisted
    /// session, if any.
    #[must_use]
    pub fn new(base_url: &str, store: Arc<dyn SessionStore>) -> Self {
        let http = HttpClient::new(base_url);

        let catalog: Arc<dyn CatalogService> = Arc::new(HttpCatalogService::new(http.clone()));
        let slots: Arc<dyn SlotService> = Arc::new(HttpSlotService::new(http.clone()));
        let orders: Arc<dyn OrderService> = Arc::new(HttpOrderService::new(http.clone()));
        let address: Arc<dyn AddressService> = Arc::new(HttpAddressService::new(http.clone()));

        let session = SessionHandle::new(Arc::new(HttpAuthService::new(http)), store);
        if let Err(error) = session.restore() {
            tracing::warn!(%error, "persisted session could not be restored");
        }

        let cart = CartHandle::new();
        let checkout = Checkout::new(
            cart.clone(),
            session.clone(),
            Arc::clone(&orders),
            Arc::clone(&address),
        );

        Self {
            catalog,
            slots,
            orders,
            address,
            session,
            cart,
            checkout,
        }
    }

    /// Slots open for `product`, or an empty list when the lookup fails.
    pub async fn product_slots(&self, product: ProductId) -> Vec<Slot> {
        slots_or_empty(self.slots.as_ref(), product).await
    }

    /// The signed-in shopper's order history.
    ///
    /// # Errors
    ///
    /// Returns an error when no session is signed in or the fetch fails.
    pub async fn order_history(&self) -> Result<Vec<Order>, OrderServiceError> {
        let Some(session) = self.session.current() else {
            return Err(OrderServiceError::Unauthorized);
        };

        self.orders.all_orders(session.bearer()).await
    }

    /// Reset every pending slot. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error when the session is missing or not an admin, or
    /// the reset call fails.
    pub async fn reset_pending_slots(&self) -> Result<Vec<Slot>, SlotServiceError> {
        let session = self.session.require_admin().map_err(|error| match error {
            SessionError::AdminRequired => SlotServiceError::AdminRequired,
            _ => SlotServiceError::Unauthorized,
        })?;

        self.slots.reset_all_pending(session.bearer()).await
    }
}

//! Order service.

use async_trait::async_trait;
use mockall::automock;
use tricto::orders::{NewOrder, Order};

use crate::{
    domain::orders::{
        errors::OrderServiceError,
        records::{OrderPayload, OrderRecord},
    },
    http::HttpClient,
};

/// The backend's opaque confirmation for a placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Raw confirmation body returned by the order endpoint.
    pub confirmation: String,
}

/// Order placement and history collaborator. Every call is authenticated.
#[automock]
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submit an order.
    async fn place_order(
        &self,
        bearer: &str,
        order: &NewOrder,
    ) -> Result<OrderReceipt, OrderServiceError>;

    /// Fetch the shopper's order history.
    async fn all_orders(&self, bearer: &str) -> Result<Vec<Order>, OrderServiceError>;
}

/// Order service backed by the REST backend.
#[derive(Debug, Clone)]
pub struct HttpOrderService {
    http: HttpClient,
}

impl HttpOrderService {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl OrderService for HttpOrderService {
    async fn place_order(
        &self,
        bearer: &str,
        order: &NewOrder,
    ) -> Result<OrderReceipt, OrderServiceError> {
        let payload = OrderPayload::try_from(order)?;

        let confirmation = self
            .http
            .post_text("orders/addOrder", &payload, Some(bearer))
            .await?;

        Ok(OrderReceipt { confirmation })
    }

    async fn all_orders(&self, bearer: &str) -> Result<Vec<Order>, OrderServiceError> {
        let records: Vec<OrderRecord> = self
            .http
            .get_json("orders/getAllOrder", Some(bearer))
            .await?;

        records.into_iter().map(OrderRecord::into_domain).collect()
    }
}

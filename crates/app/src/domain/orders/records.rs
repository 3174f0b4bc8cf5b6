//! Order wire records.
//!
//! The order endpoints mix conventions: the envelope is snake_cased
//! (`user_id`, `slot_id`) while the line items are camelCased. Both shapes
//! are pinned here.

use serde::{Deserialize, Serialize};
use tricto::{
    catalog::ProductId,
    orders::{NewOrder, Order, OrderItem, UserId},
    slots::SlotId,
};

use crate::domain::{
    money::{price_from_major, price_to_major},
    orders::errors::OrderServiceError,
};

/// Envelope for `POST /orders/addOrder`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub user_id: i32,
    pub slot_id: i32,
    pub items: Vec<OrderItemPayload>,
}

/// One submitted line item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: i32,
    pub product_name: String,
    pub price: f64,
    pub quantity: u32,
    pub image_url: Option<String>,
}

impl TryFrom<&NewOrder> for OrderPayload {
    type Error = OrderServiceError;

    fn try_from(order: &NewOrder) -> Result<Self, Self::Error> {
        let items = order
            .items
            .iter()
            .map(|item| {
                let price =
                    price_to_major(item.unit_price).ok_or(OrderServiceError::InvalidPrice)?;

                Ok(OrderItemPayload {
                    product_id: item.product.into_i32(),
                    product_name: item.name.clone(),
                    price,
                    quantity: item.quantity,
                    image_url: item.image.clone(),
                })
            })
            .collect::<Result<Vec<_>, OrderServiceError>>()?;

        Ok(Self {
            user_id: order.user.into_i32(),
            slot_id: order.slot.into_i32(),
            items,
        })
    }
}

/// Order as served by `GET /orders/getAllOrder`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub user_id: i32,

    pub slot_id: i32,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub items: Vec<OrderItemRecord>,
}

/// One line item of a fetched order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRecord {
    pub product_id: i32,

    #[serde(default)]
    pub product_name: String,

    pub price: f64,

    #[serde(default)]
    pub quantity: Option<u32>,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl OrderRecord {
    /// Convert into the domain model.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::InvalidPrice`] when an item price is not
    /// a representable amount.
    pub fn into_domain(self) -> Result<Order, OrderServiceError> {
        let items = self
            .items
            .into_iter()
            .map(|item| {
                let unit_price =
                    price_from_major(item.price).ok_or(OrderServiceError::InvalidPrice)?;

                Ok(OrderItem {
                    product: ProductId::from_i32(item.product_id),
                    name: item.product_name,
                    unit_price,
                    quantity: item.quantity.unwrap_or(1),
                    image: item.image_url,
                })
            })
            .collect::<Result<Vec<_>, OrderServiceError>>()?;

        Ok(Order {
            user: UserId::from_i32(self.user_id),
            slot: SlotId::from_i32(self.slot_id),
            items,
            status: self.status,
        })
    }
}

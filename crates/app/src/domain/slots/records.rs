//! Slot wire records.

use rust_decimal::Decimal;
use serde::Deserialize;
use tricto::{
    catalog::ProductId,
    slots::{Slot, SlotId},
};

use crate::domain::slots::errors::SlotServiceError;

/// Slot as served by `GET /slots/product/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    pub slot_id: i32,

    #[serde(default)]
    pub product_id: Option<i32>,

    pub max_slot_size: i32,

    #[serde(default)]
    pub is_full: bool,

    pub current_slot_size: i32,

    pub discount_percentage: f64,
}

impl SlotRecord {
    /// Convert into the domain model.
    ///
    /// # Errors
    ///
    /// Returns [`SlotServiceError::InvalidDiscount`] when the wire discount
    /// is not a representable decimal. Out-of-range percentages are carried
    /// through; the pricing resolver rejects them at resolution time.
    pub fn into_domain(self) -> Result<Slot, SlotServiceError> {
        let discount_percentage = Decimal::from_f64_retain(self.discount_percentage)
            .ok_or(SlotServiceError::InvalidDiscount)?;

        Ok(Slot {
            id: SlotId::from_i32(self.slot_id),
            product: ProductId::from_i32(self.product_id.unwrap_or(0)),
            max_capacity: self.max_slot_size,
            current_fill: self.current_slot_size,
            discount_percentage,
            is_full: self.is_full,
        })
    }
}

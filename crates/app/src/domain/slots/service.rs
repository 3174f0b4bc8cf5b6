//! Slot service.

use async_trait::async_trait;
use mockall::automock;
use tricto::{catalog::ProductId, slots::Slot};

use crate::{
    domain::slots::{errors::SlotServiceError, records::SlotRecord},
    http::HttpClient,
};

/// Discount tier collaborator.
#[automock]
#[async_trait]
pub trait SlotService: Send + Sync {
    /// Fetch the discount tiers for a product.
    async fn slots_for_product(&self, product: ProductId) -> Result<Vec<Slot>, SlotServiceError>;

    /// Reset every pending (not yet full) slot. Admin-only; the bearer token
    /// must carry the `ADMIN` role.
    async fn reset_all_pending(&self, bearer: &str) -> Result<Vec<Slot>, SlotServiceError>;
}

/// Fetch a product's tiers, treating any failure as "no tiers available".
///
/// Tiers are optional decoration on a product page; a fetch failure must not
/// become an error state there. The failure is logged and an empty list
/// returned.
pub async fn slots_or_empty(service: &dyn SlotService, product: ProductId) -> Vec<Slot> {
    match service.slots_for_product(product).await {
        Ok(slots) => slots,
        Err(error) => {
            tracing::warn!(%product, %error, "slot fetch failed; treating as no tiers");
            Vec::new()
        }
    }
}

/// Slot service backed by the REST backend.
#[derive(Debug, Clone)]
pub struct HttpSlotService {
    http: HttpClient,
}

impl HttpSlotService {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SlotService for HttpSlotService {
    async fn slots_for_product(&self, product: ProductId) -> Result<Vec<Slot>, SlotServiceError> {
        let records: Vec<SlotRecord> = self
            .http
            .get_json(&format!("slots/product/{product}"), None)
            .await?;

        records.into_iter().map(SlotRecord::into_domain).collect()
    }

    async fn reset_all_pending(&self, bearer: &str) -> Result<Vec<Slot>, SlotServiceError> {
        let records: Vec<SlotRecord> = self
            .http
            .post_json("slots/reset-all-pending", &serde_json::json!({}), Some(bearer))
            .await?;

        records.into_iter().map(SlotRecord::into_domain).collect()
    }
}

//! Address service.
//!
//! Shipping address persistence is best-effort: the checkout workflow logs a
//! failure here and proceeds with order placement regardless.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use tricto::orders::UserId;

use crate::{domain::address::errors::AddressServiceError, http::HttpClient};

/// A shipping address to persist for the shopper.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub address_line: String,
    pub pincode: String,
    pub user: UserId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddressPayload<'a> {
    address_line: &'a str,
    pincode: &'a str,
    user_id: i32,
}

/// Address persistence collaborator.
#[automock]
#[async_trait]
pub trait AddressService: Send + Sync {
    /// Persist a shipping address for future orders.
    async fn save_address(
        &self,
        bearer: &str,
        address: &NewAddress,
    ) -> Result<(), AddressServiceError>;
}

/// Address service backed by the REST backend.
#[derive(Debug, Clone)]
pub struct HttpAddressService {
    http: HttpClient,
}

impl HttpAddressService {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AddressService for HttpAddressService {
    async fn save_address(
        &self,
        bearer: &str,
        address: &NewAddress,
    ) -> Result<(), AddressServiceError> {
        let payload = AddressPayload {
            address_line: &address.address_line,
            pincode: &address.pincode,
            user_id: address.user.into_i32(),
        };

        self.http.post_unit("address", &payload, Some(bearer)).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn payload_uses_the_backend_field_names() -> TestResult {
        let payload = AddressPayload {
            address_line: "12 MG Road",
            pincode: "560001",
            user_id: 5,
        };

        let value = serde_json::to_value(&payload)?;

        assert_eq!(value["addressLine"], "12 MG Road");
        assert_eq!(value["pincode"], "560001");
        assert_eq!(value["userId"], 5);

        Ok(())
    }
}

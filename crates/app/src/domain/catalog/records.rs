//! Catalog wire records.

use serde::Deserialize;
use tricto::catalog::{Category, CategoryId, Product, ProductId};

use crate::domain::{catalog::errors::CatalogServiceError, money::price_from_major};

/// Product as served by `GET /products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub product_id: i32,

    #[serde(default)]
    pub category_id: Option<i32>,

    pub product_name: String,

    pub price: f64,

    #[serde(default)]
    pub quantity: Option<u32>,

    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

/// Image row attached to a product; up to three URLs per row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(default)]
    pub img1: Option<String>,

    #[serde(default)]
    pub img2: Option<String>,

    #[serde(default)]
    pub img3: Option<String>,
}

/// Category as served by the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub category_id: i32,

    pub category_name: String,

    #[serde(default)]
    pub category_description: Option<String>,
}

impl ProductRecord {
    /// Convert into the domain model.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::InvalidPrice`] when the wire price is
    /// not a representable amount.
    pub fn into_domain(self) -> Result<Product, CatalogServiceError> {
        let price = price_from_major(self.price).ok_or(CatalogServiceError::InvalidPrice)?;

        let images = self
            .images
            .into_iter()
            .flat_map(|row| [row.img1, row.img2, row.img3])
            .flatten()
            .collect();

        Ok(Product {
            id: ProductId::from_i32(self.product_id),
            name: self.product_name,
            price,
            category: self.category_id.map(CategoryId::from_i32),
            inventory: self.quantity.unwrap_or(0),
            images,
        })
    }
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: CategoryId::from_i32(record.category_id),
            name: record.category_name,
            description: record.category_description,
        }
    }
}

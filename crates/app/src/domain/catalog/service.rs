//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use tricto::catalog::{Category, Product, ProductId};

use crate::{
    domain::catalog::{
        errors::CatalogServiceError,
        records::{CategoryRecord, ProductRecord},
    },
    http::HttpClient,
};

/// Read-only product catalog collaborator.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch the full product list.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// Fetch a single product.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogServiceError>;

    /// Fetch the category list.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError>;
}

/// Catalog service backed by the REST backend.
#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    http: HttpClient,
}

impl HttpCatalogService {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let records: Vec<ProductRecord> = self.http.get_json("products", None).await?;

        records
            .into_iter()
            .map(ProductRecord::into_domain)
            .collect()
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogServiceError> {
        let record: ProductRecord = self.http.get_json(&format!("products/{id}"), None).await?;

        record.into_domain()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        let records: Vec<CategoryRecord> = self.http.get_json("categories", None).await?;

        Ok(records.into_iter().map(Category::from).collect())
    }
}

//! Catalog
//!
//! Read-only views of the product catalog. Products and categories are owned
//! by the backend; the client never mutates them, it only prices and carts
//! snapshots of them.

use rusty_money::{Money, iso::Currency};

use crate::ids::TypedId;

/// Product identifier.
pub type ProductId = TypedId<Product>;

/// Category identifier.
pub type CategoryId = TypedId<Category>;

/// A product as served by the catalog service.
#[derive(Debug, Clone)]
pub struct Product {
    /// Backend identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Authoritative base price; discounts are resolved against this.
    pub price: Money<'static, Currency>,

    /// Owning category, when the backend provides one.
    pub category: Option<CategoryId>,

    /// Units the backend reports in stock. Informational only; never copied
    /// into cart quantities.
    pub inventory: u32,

    /// Image URLs in display order.
    pub images: Vec<String>,
}

/// A product category.
#[derive(Debug, Clone)]
pub struct Category {
    /// Backend identifier.
    pub id: CategoryId,

    /// Display name.
    pub name: String,

    /// Optional marketing copy.
    pub description: Option<String>,
}

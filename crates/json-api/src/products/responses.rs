//! Product responses.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use store_app::domain::products::records::ProductRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: String,

    /// Display name
    pub name: String,

    /// Units in stock
    pub quantity: i64,

    /// Exact decimal price, e.g. "99.99"
    pub price: String,

    /// Whether the product is active
    pub status: bool,

    /// When the product was created (RFC 3339)
    pub created_at: String,

    /// When the product was last updated (RFC 3339)
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.to_string(),
            name: product.name,
            quantity: product.quantity,
            price: product.price.to_string(),
            status: product.status,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

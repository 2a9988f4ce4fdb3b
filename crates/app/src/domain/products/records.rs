//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductUuid,
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
    pub status: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

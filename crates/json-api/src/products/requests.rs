//! Product request payloads.

use rust_decimal::Decimal;
use serde::Deserialize;

use store_app::domain::products::{
    ProductValidationError,
    data::{NewProduct, ProductUpdate},
};

/// Create Product Request
///
/// `price` accepts a JSON number or a decimal string.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
    pub status: bool,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ProductValidationError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        NewProduct {
            name: request.name,
            quantity: request.quantity,
            price: request.price,
            status: request.status,
        }
        .validated()
    }
}

/// Update Product Request
///
/// Every field is optional; omitted or `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = ProductValidationError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        ProductUpdate {
            name: request.name,
            quantity: request.quantity,
            price: request.price,
            status: request.status,
        }
        .validated()
    }
}

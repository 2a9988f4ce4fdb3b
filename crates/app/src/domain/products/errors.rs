//! Products service errors.

use thiserror::Error;

use crate::documents::DocumentStoreError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("invalid product document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}

/// Reasons a product payload is rejected before it reaches the store.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProductValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("quantity cannot be negative")]
    NegativeQuantity,

    #[error("price cannot be negative")]
    NegativePrice,
}

//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use store_app::domain::products::{ProductValidationError, ProductsServiceError};

/// Map a service error onto its HTTP status.
pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        other => {
            error!("product request failed: {other}");

            StatusError::internal_server_error().detail(other.to_string())
        }
    }
}

/// Map a rejected payload onto 422.
pub(crate) fn invalid_payload(error: &ProductValidationError) -> StatusError {
    StatusError::unprocessable_entity()
        .brief("Invalid product payload")
        .detail(error.to_string())
}

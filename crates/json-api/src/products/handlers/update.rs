//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use store_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{
        errors::{into_status_error, invalid_payload},
        requests::UpdateProductRequest,
        responses::ProductResponse,
    },
    state::State,
};

/// Product Update Handler
///
/// Applies the fields present in the body and leaves the rest unchanged.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid product payload"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip_all,
    fields(product_id = id.as_str()),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    let request = req
        .parse_json::<UpdateProductRequest>()
        .await
        .or_422("Invalid product payload")?;

    let update = ProductUpdate::try_from(request).map_err(|error| invalid_payload(&error))?;

    let updated = state
        .app
        .products
        .update_product(&id, update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_id = %updated.id, "updated product");

    Ok(Json(updated.into()))
}

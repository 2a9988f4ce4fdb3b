//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use store_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{
        errors::{into_status_error, invalid_payload},
        requests::CreateProductRequest,
        responses::ProductResponse,
    },
    state::State,
};

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid product payload"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip_all,
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = req
        .parse_json::<CreateProductRequest>()
        .await
        .or_422("Invalid product payload")?;

    let product = NewProduct::try_from(request).map_err(|error| invalid_payload(&error))?;

    let created = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("product_id", tracing::field::display(created.id));

    res.add_header(LOCATION, format!("/products/{}", created.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_id = %created.id, "created product");

    Ok(Json(created.into()))
}

//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use store_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    state::State,
};

/// Product Index Handler
///
/// Returns every product matching the optional price range and status.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid query parameter"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    min_price: QueryParam<String, false>,
    max_price: QueryParam<String, false>,
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        min_price: min_price.into_decimal("min_price")?,
        max_price: max_price.into_decimal("max_price")?,
        status: status.into_bool("status")?,
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::dec;
use salvo::{affix_state::inject, prelude::*};
use serde::de::Error as _;

use store_app::{
    context::AppContext,
    domain::products::{
        MockProductsService, ProductsServiceError,
        records::{ProductRecord, ProductUuid},
    },
};

use crate::state::State;

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
    })
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

pub(crate) fn make_product(id: ProductUuid) -> ProductRecord {
    ProductRecord {
        id,
        name: "Desk".to_string(),
        quantity: 5,
        price: dec!(199.99),
        status: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A service failure that is not "not found".
pub(crate) fn invalid_document() -> ProductsServiceError {
    ProductsServiceError::InvalidDocument(serde_json::Error::custom("corrupt document"))
}

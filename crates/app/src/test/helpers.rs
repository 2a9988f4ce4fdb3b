//! Test Helpers

use std::sync::Arc;

use rust_decimal::dec;

use crate::{
    documents::MemoryDocumentStore,
    domain::products::{DocumentProductsService, data::NewProduct},
};

/// A products service over a fresh in-memory store.
pub(crate) fn memory_service() -> DocumentProductsService {
    DocumentProductsService::new(Arc::new(MemoryDocumentStore::new()))
}

/// A valid product to create.
pub(crate) fn desk() -> NewProduct {
    NewProduct {
        name: "Desk".to_string(),
        quantity: 5,
        price: dec!(199.99),
        status: true,
    }
}

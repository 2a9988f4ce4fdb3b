//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    database,
    documents::{MemoryDocumentStore, PgDocumentStore},
    domain::products::{DocumentProductsService, ProductsService},
};

/// Collection holding product documents.
pub const PRODUCTS_COLLECTION: &str = "products";

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migration(#[source] sqlx::migrate::MigrateError),

    #[error("failed to start async runtime")]
    Runtime(#[source] std::io::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
}

impl AppContext {
    /// Build application context from a database URL, applying any pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migration)?;

        info!(collection = PRODUCTS_COLLECTION, "document store ready");

        let store = PgDocumentStore::new(pool, PRODUCTS_COLLECTION);

        Ok(Self {
            products: Arc::new(DocumentProductsService::new(Arc::new(store))),
        })
    }

    /// Build application context over an empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            products: Arc::new(DocumentProductsService::new(Arc::new(
                MemoryDocumentStore::new(),
            ))),
        }
    }
}

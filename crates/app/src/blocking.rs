//! Blocking Products Service
//!
//! Synchronous access to [`ProductsService`] for batch tooling and fixtures.
//! Each facade owns a current-thread runtime and drives the async service on
//! it, so none of the product logic is duplicated.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tokio::runtime::{Builder, Runtime};

use crate::{
    context::{AppContext, AppInitError},
    domain::products::{
        ProductsService, ProductsServiceError,
        data::{NewProduct, ProductFilter, ProductUpdate},
        records::ProductRecord,
    },
};

/// Products service with blocking methods.
///
/// # Panics
///
/// Every method blocks on the owned runtime and panics if called from
/// within another async runtime.
pub struct BlockingProductsService {
    runtime: Runtime,
    inner: Arc<dyn ProductsService>,
}

impl BlockingProductsService {
    /// Wrap an existing service.
    ///
    /// # Errors
    ///
    /// Returns an error when the runtime cannot be started.
    pub fn new(inner: Arc<dyn ProductsService>) -> Result<Self, AppInitError> {
        Ok(Self {
            runtime: runtime()?,
            inner,
        })
    }

    /// Connect to `PostgreSQL` and apply migrations on the facade's own
    /// runtime, so the pool is bound to it.
    ///
    /// # Errors
    ///
    /// Returns an error when the runtime cannot be started or the database
    /// cannot be initialised.
    pub fn connect(database_url: &str) -> Result<Self, AppInitError> {
        let runtime = runtime()?;
        let context = runtime.block_on(AppContext::from_database_url(database_url))?;

        Ok(Self {
            runtime,
            inner: context.products,
        })
    }

    /// A facade over an empty in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error when the runtime cannot be started.
    pub fn in_memory() -> Result<Self, AppInitError> {
        Self::new(AppContext::in_memory().products)
    }

    /// Retrieves every product matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails or holds an invalid document.
    pub fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        self.runtime.block_on(self.inner.list_products(filter))
    }

    /// Retrieve a single product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::NotFound`] for an unknown id.
    pub fn get_product(&self, id: &str) -> Result<ProductRecord, ProductsServiceError> {
        self.runtime.block_on(self.inner.get_product(id))
    }

    /// Creates a new product.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.runtime.block_on(self.inner.create_product(product))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::NotFound`] for an unknown id.
    pub fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.runtime.block_on(self.inner.update_product(id, update))
    }

    /// Applies a partial update, returning `None` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub fn try_update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, ProductsServiceError> {
        self.runtime
            .block_on(self.inner.try_update_product(id, update))
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::NotFound`] for an unknown id.
    pub fn delete_product(&self, id: &str) -> Result<(), ProductsServiceError> {
        self.runtime.block_on(self.inner.delete_product(id))
    }

    /// Deletes a product, returning whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub fn try_delete_product(&self, id: &str) -> Result<bool, ProductsServiceError> {
        self.runtime.block_on(self.inner.try_delete_product(id))
    }
}

impl Debug for BlockingProductsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BlockingProductsService")
            .field("runtime", &self.runtime)
            .finish_non_exhaustive()
    }
}

fn runtime() -> Result<Runtime, AppInitError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppInitError::Runtime)
}

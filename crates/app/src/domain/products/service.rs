//! Products service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, error};

use crate::{
    documents::DocumentStore,
    domain::products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        errors::ProductsServiceError,
        mapper::{
            new_product_document, product_from_document, product_update_document, stamp_created,
            stamp_updated,
        },
        query::build_filter,
        records::{ProductRecord, ProductUuid},
    },
};

/// Products service over any [`DocumentStore`].
#[derive(Clone)]
pub struct DocumentProductsService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentProductsService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn find_product(&self, id: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let document = self
            .store
            .find_one(id.into_uuid())
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        product_from_document(document).map_err(|error| {
            error!(product = %id, %error, "stored product document is invalid");
            ProductsServiceError::InvalidDocument(error)
        })
    }
}

impl Debug for DocumentProductsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DocumentProductsService")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductsService for DocumentProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let filter = build_filter(&filter);

        debug!(filter = %filter.to_json(), "listing products");

        self.store
            .find(&filter)
            .await?
            .into_iter()
            .map(|document| product_from_document(document).map_err(Into::into))
            .collect()
    }

    async fn get_product(&self, id: &str) -> Result<ProductRecord, ProductsServiceError> {
        self.find_product(parse_id(id)?).await
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut document = new_product_document(&product)?;
        stamp_created(&mut document, Timestamp::now());

        let id = ProductUuid::from_uuid(self.store.insert_one(document).await?);

        debug!(product = %id, "created product");

        self.find_product(id).await
    }

    async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.try_update_product(id, update)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn try_update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, ProductsServiceError> {
        let Ok(id) = id.parse::<ProductUuid>() else {
            return Ok(None);
        };

        let mut set = product_update_document(&update)?;
        stamp_updated(&mut set, Timestamp::now());

        let matched = self.store.update_one(id.into_uuid(), set).await?;

        if matched == 0 {
            return Ok(None);
        }

        debug!(product = %id, "updated product");

        match self.find_product(id).await {
            Ok(product) => Ok(Some(product)),
            Err(ProductsServiceError::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn delete_product(&self, id: &str) -> Result<(), ProductsServiceError> {
        if self.try_delete_product(id).await? {
            Ok(())
        } else {
            Err(ProductsServiceError::NotFound)
        }
    }

    async fn try_delete_product(&self, id: &str) -> Result<bool, ProductsServiceError> {
        let Ok(id) = id.parse::<ProductUuid>() else {
            return Ok(false);
        };

        let deleted = self.store.delete_one(id.into_uuid()).await?;

        debug!(product = %id, deleted, "deleted product");

        Ok(deleted > 0)
    }
}

/// Parse a product id. An id that is not a UUID cannot name any stored
/// product, so it reads as not found.
fn parse_id(id: &str) -> Result<ProductUuid, ProductsServiceError> {
    id.parse().map_err(|_| ProductsServiceError::NotFound)
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves every product matching the filter.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: &str) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product, stamping its creation and update times.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update, failing with `NotFound` for an unknown id.
    async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update, returning `None` for an unknown id.
    async fn try_update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, ProductsServiceError>;

    /// Deletes a product, failing with `NotFound` for an unknown id.
    async fn delete_product(&self, id: &str) -> Result<(), ProductsServiceError>;

    /// Deletes a product, returning whether anything was removed.
    async fn try_delete_product(&self, id: &str) -> Result<bool, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        documents::{DocumentStoreError, MemoryDocumentStore, MockDocumentStore},
        test::{
            TestContext,
            helpers::{desk, memory_service},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_then_get_returns_the_same_product() -> TestResult {
        let products = memory_service();

        let created = products.create_product(desk()).await?;
        let fetched = products.get_product(&created.id.to_string()).await?;

        assert_eq!(created, fetched);
        assert_eq!(created.name, "Desk");
        assert_eq!(created.quantity, 5);
        assert_eq!(created.price, dec!(199.99));
        assert!(created.status);
        assert_eq!(created.created_at, created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn price_precision_is_preserved() -> TestResult {
        let products = memory_service();

        let created = products
            .create_product(NewProduct {
                price: dec!(0.10),
                ..desk()
            })
            .await?;

        assert_eq!(created.price.to_string(), "0.10");

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_id_returns_not_found() {
        let products = memory_service();

        let result = products.get_product(&Uuid::now_v7().to_string()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn malformed_ids_are_not_found() {
        let products = memory_service();

        let get = products.get_product("not-an-id").await;
        let update = products
            .update_product("not-an-id", ProductUpdate::default())
            .await;
        let delete = products.delete_product("not-an-id").await;

        assert!(matches!(get, Err(ProductsServiceError::NotFound)), "get: {get:?}");
        assert!(
            matches!(update, Err(ProductsServiceError::NotFound)),
            "update: {update:?}"
        );
        assert!(
            matches!(delete, Err(ProductsServiceError::NotFound)),
            "delete: {delete:?}"
        );
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_untouched() -> TestResult {
        let products = memory_service();
        let created = products.create_product(desk()).await?;

        let updated = products
            .update_product(
                &created.id.to_string(),
                ProductUpdate {
                    quantity: Some(2),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.price, created.price);
        assert_eq!(updated.status, created.status);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_never_creates_a_product() -> TestResult {
        let products = memory_service();

        let strict = products
            .update_product(
                &Uuid::now_v7().to_string(),
                ProductUpdate {
                    name: Some("Ghost".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await;

        let permissive = products
            .try_update_product(&Uuid::now_v7().to_string(), ProductUpdate::default())
            .await?;

        assert!(
            matches!(strict, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {strict:?}"
        );
        assert!(permissive.is_none());
        assert!(products.list_products(ProductFilter::default()).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn strict_delete_of_missing_product_is_not_found() -> TestResult {
        let products = memory_service();
        let created = products.create_product(desk()).await?;
        let id = created.id.to_string();

        products.delete_product(&id).await?;

        let again = products.delete_product(&id).await;
        let fetched = products.get_product(&id).await;

        assert!(
            matches!(again, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );
        assert!(
            matches!(fetched, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {fetched:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn permissive_delete_reports_whether_anything_was_removed() -> TestResult {
        let products = memory_service();
        let created = products.create_product(desk()).await?;
        let id = created.id.to_string();

        assert!(products.try_delete_product(&id).await?);
        assert!(!products.try_delete_product(&id).await?);
        assert!(!products.try_delete_product("not-an-id").await?);

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_price_range_and_status() -> TestResult {
        let products = memory_service();

        for (name, price, status) in [
            ("Stool", dec!(30), true),
            ("Sofa", dec!(300), true),
            ("Chair", dec!(100), false),
        ] {
            products
                .create_product(NewProduct {
                    name: name.to_string(),
                    quantity: 1,
                    price,
                    status,
                })
                .await?;
        }

        let in_range = products
            .list_products(ProductFilter {
                min_price: Some(dec!(10)),
                max_price: Some(dec!(100)),
                status: None,
            })
            .await?;

        let active_in_range = products
            .list_products(ProductFilter {
                min_price: Some(dec!(10)),
                max_price: Some(dec!(100)),
                status: Some(true),
            })
            .await?;

        let inactive = products
            .list_products(ProductFilter {
                status: Some(false),
                ..ProductFilter::default()
            })
            .await?;

        let names = |list: &[ProductRecord]| -> Vec<String> {
            list.iter().map(|product| product.name.clone()).collect()
        };

        assert_eq!(names(&in_range), vec!["Stool", "Chair"]);
        assert_eq!(names(&active_in_range), vec!["Stool"]);
        assert_eq!(names(&inactive), vec!["Chair"]);
        assert_eq!(
            products.list_products(ProductFilter::default()).await?.len(),
            3
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_by_minimum_price_or_status() -> TestResult {
        let products = memory_service();

        let mut created = Vec::new();

        for (price, status) in [(dec!(30.00), true), (dec!(300.00), true), (dec!(100.00), false)] {
            created.push(
                products
                    .create_product(NewProduct {
                        price,
                        status,
                        ..desk()
                    })
                    .await?,
            );
        }

        let [cheap, expensive, inactive] = created.as_slice() else {
            return Err("expected three products".into());
        };

        let above_fifty = products
            .list_products(ProductFilter {
                min_price: Some(dec!(50)),
                ..ProductFilter::default()
            })
            .await?;

        let active = products
            .list_products(ProductFilter {
                status: Some(true),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(above_fifty, vec![expensive.clone(), inactive.clone()]);
        assert_eq!(active, vec![cheap.clone(), expensive.clone()]);

        Ok(())
    }

    #[tokio::test]
    async fn list_with_no_products_is_empty() -> TestResult {
        let products = DocumentProductsService::new(Arc::new(MemoryDocumentStore::new()));

        assert!(products.list_products(ProductFilter::default()).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut store = MockDocumentStore::new();

        store
            .expect_insert_one()
            .returning(|_| Err(DocumentStoreError::Sql(sqlx::Error::PoolTimedOut)));

        let products = DocumentProductsService::new(Arc::new(store));

        let result = products.create_product(desk()).await;

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::Store(DocumentStoreError::Sql(
                    sqlx::Error::PoolTimedOut
                )))
            ),
            "expected store error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn vanished_document_after_update_is_not_found() {
        let mut store = MockDocumentStore::new();

        store.expect_update_one().returning(|_, _| Ok(1));
        store.expect_find_one().returning(|_| Ok(None));

        let products = DocumentProductsService::new(Arc::new(store));

        let result = products
            .update_product(&Uuid::now_v7().to_string(), ProductUpdate::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_sets_only_present_fields_and_updated_at() {
        let mut store = MockDocumentStore::new();
        let id = Uuid::now_v7();

        store
            .expect_update_one()
            .withf(move |target, set| {
                *target == id
                    && set.len() == 2
                    && set.get("status") == Some(&serde_json::Value::Bool(false))
                    && set.contains_key("updated_at")
            })
            .times(1)
            .returning(|_, _| Ok(0));

        let products = DocumentProductsService::new(Arc::new(store));

        let result = products
            .try_update_product(
                &id.to_string(),
                ProductUpdate {
                    status: Some(false),
                    ..ProductUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Ok(None)),
            "expected no match, got {result:?}"
        );
    }

    #[tokio::test]
    async fn invalid_stored_documents_are_reported() {
        let mut store = MockDocumentStore::new();

        store.expect_find_one().returning(|id| {
            let mut document = crate::documents::Document::new();
            document.insert("_id".to_string(), id.to_string().into());
            document.insert("name".to_string(), "Broken".into());
            Ok(Some(document))
        });

        let products = DocumentProductsService::new(Arc::new(store));

        let result = products.get_product(&Uuid::now_v7().to_string()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidDocument(_))),
            "expected InvalidDocument, got {result:?}"
        );
    }

    #[tokio::test]
    async fn postgres_create_update_and_list() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(desk()).await?;
        let id = created.id.to_string();

        assert_eq!(ctx.products.get_product(&id).await?, created);

        let updated = ctx
            .products
            .update_product(
                &id,
                ProductUpdate {
                    price: Some(dec!(10.05)),
                    status: Some(false),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.price.to_string(), "10.05");
        assert!(!updated.status);
        assert_eq!(updated.quantity, created.quantity);
        assert!(updated.updated_at > created.updated_at);

        let cheap_inactive = ctx
            .products
            .list_products(ProductFilter {
                min_price: Some(dec!(10.05)),
                max_price: Some(dec!(10.05)),
                status: Some(false),
            })
            .await?;

        assert_eq!(cheap_inactive, vec![updated]);

        Ok(())
    }

    #[tokio::test]
    async fn postgres_delete_removes_the_document() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(desk()).await?;

        ctx.products.delete_product(&created.id.to_string()).await?;

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(remaining, 0);
        assert!(!ctx.products.try_delete_product(&created.id.to_string()).await?);

        Ok(())
    }
}

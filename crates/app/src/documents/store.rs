//! Document store trait.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::documents::{errors::DocumentStoreError, filter::Filter, models::Document};

/// A single collection of JSON documents addressed by store-generated ids.
#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return the identifier the store assigned to it.
    async fn insert_one(&self, document: Document) -> Result<Uuid, DocumentStoreError>;

    /// Fetch a single document by id, with the id exposed under `_id`.
    async fn find_one(&self, id: Uuid) -> Result<Option<Document>, DocumentStoreError>;

    /// Fetch every document matching the filter, in insertion order.
    async fn find(&self, filter: &Filter) -> Result<Vec<Document>, DocumentStoreError>;

    /// Set the given top-level fields on a document. Returns the number of
    /// documents matched.
    async fn update_one(&self, id: Uuid, set: Document) -> Result<u64, DocumentStoreError>;

    /// Delete a document. Returns the number of documents removed.
    async fn delete_one(&self, id: Uuid) -> Result<u64, DocumentStoreError>;
}

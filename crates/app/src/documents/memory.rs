//! In-memory document store.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::documents::{
    errors::DocumentStoreError,
    filter::Filter,
    models::{Document, with_id, without_id},
    store::DocumentStore,
};

/// A [`DocumentStore`] held entirely in process memory. Clones share the
/// same collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<BTreeMap<Uuid, Document>>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(&self, document: Document) -> Result<Uuid, DocumentStoreError> {
        let id = Uuid::now_v7();

        self.documents
            .write()
            .await
            .insert(id, without_id(document));

        Ok(id)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Document>, DocumentStoreError> {
        let documents = self.documents.read().await;

        Ok(documents.get(&id).map(|body| with_id(body.clone(), id)))
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Document>, DocumentStoreError> {
        let documents = self.documents.read().await;

        Ok(documents
            .iter()
            .filter(|(_, body)| filter.matches(body))
            .map(|(id, body)| with_id(body.clone(), *id))
            .collect())
    }

    async fn update_one(&self, id: Uuid, set: Document) -> Result<u64, DocumentStoreError> {
        let mut documents = self.documents.write().await;

        let Some(body) = documents.get_mut(&id) else {
            return Ok(0);
        };

        body.extend(without_id(set));

        Ok(1)
    }

    async fn delete_one(&self, id: Uuid) -> Result<u64, DocumentStoreError> {
        let removed = self.documents.write().await.remove(&id);

        Ok(u64::from(removed.is_some()))
    }
}

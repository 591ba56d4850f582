//! Process-local DocumentStore.
//!
//! Mirrors the MongoDB store's observable behavior (ObjectId-style ids,
//! insertion order, filter semantics) without a server. Used by the handler
//! tests and for local runs.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::StoreResult;
use crate::filter::Filter;
use crate::store::{Document, DocumentStore};

#[derive(Default)]
pub struct InMemoryDocumentStore {
    database: String,
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    #[instrument(skip(self, payload))]
    async fn create_document(&self, collection: &str, mut payload: Document) -> StoreResult<String> {
        let id = match payload.get("_id") {
            Some(Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => {
                let id = ObjectId::new().to_hex();
                payload.insert("_id".to_string(), Value::String(id.clone()));
                id
            }
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(payload);

        tracing::debug!(document_id = %id, "Document stored in memory");
        Ok(id)
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: i64,
    ) -> StoreResult<Vec<Document>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.collections.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn database_name(&self) -> String {
        self.database.clone()
    }
}

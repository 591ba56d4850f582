use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreResult;
use crate::filter::Filter;

/// A stored document as a JSON object. The store identity lives in `_id`.
pub type Document = Map<String, Value>;

/// Persistence port for schemaless collections.
///
/// Documents come back with `_id` rendered as a string (ObjectId hex for
/// MongoDB).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `payload` as a new document and return its identifier.
    async fn create_document(&self, collection: &str, payload: Document) -> StoreResult<String>;

    /// Up to `limit` documents matching `filter`, in natural order.
    async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: i64,
    ) -> StoreResult<Vec<Document>>;

    async fn list_collection_names(&self) -> StoreResult<Vec<String>>;

    fn database_name(&self) -> String;
}

/// Outward item shape: `_id` becomes a string `id`, `null` when absent.
pub fn into_item(mut doc: Document) -> Document {
    let id = match doc.remove("_id") {
        Some(Value::String(id)) => Value::String(id),
        Some(Value::Null) | None => Value::Null,
        Some(other) => Value::String(other.to_string()),
    };
    doc.insert("id".to_string(), id);
    doc
}

//! MongoDB implementation of DocumentStore

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Database,
    bson::{self, Bson, doc},
    options::FindOptions,
};
use serde_json::Value;
use tracing::instrument;

use crate::error::StoreResult;
use crate::filter::Filter;
use crate::store::{Document, DocumentStore};

/// DocumentStore over a MongoDB database.
#[derive(Clone)]
pub struct MongoDocumentStore {
    db: Database,
}

impl MongoDocumentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get the underlying database for advanced operations
    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Translate a [`Filter`] into a MongoDB query document.
///
/// Needles are regex-escaped so they match literally.
pub fn to_mongo_filter(filter: &Filter) -> StoreResult<bson::Document> {
    Ok(match filter {
        Filter::All => doc! {},
        Filter::Eq { field, value } => {
            let mut query = bson::Document::new();
            query.insert(field.as_str(), bson::to_bson(value)?);
            query
        }
        Filter::ContainsIgnoreCase { field, needle } => {
            let mut query = bson::Document::new();
            query.insert(
                field.as_str(),
                doc! { "$regex": regex::escape(needle), "$options": "i" },
            );
            query
        }
        Filter::And(filters) if filters.is_empty() => doc! {},
        Filter::And(filters) => doc! { "$and": translate_all(filters)? },
        // $or rejects an empty array; $nor of the match-all document matches nothing.
        Filter::Or(filters) if filters.is_empty() => doc! { "$nor": [doc! {}] },
        Filter::Or(filters) => doc! { "$or": translate_all(filters)? },
    })
}

fn translate_all(filters: &[Filter]) -> StoreResult<Vec<bson::Document>> {
    filters.iter().map(to_mongo_filter).collect()
}

/// Render a BSON document as JSON, with a top-level ObjectId `_id` as hex.
fn to_json_document(raw: bson::Document) -> Document {
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Bson::ObjectId(oid) if key == "_id" => Value::String(oid.to_hex()),
                other => other.into_relaxed_extjson(),
            };
            (key, value)
        })
        .collect()
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self, payload))]
    async fn create_document(&self, collection: &str, payload: Document) -> StoreResult<String> {
        let document = bson::to_document(&payload)?;

        let result = self
            .db
            .collection::<bson::Document>(collection)
            .insert_one(document)
            .await?;

        let id = id_to_string(result.inserted_id);
        tracing::info!(document_id = %id, "Document created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: i64,
    ) -> StoreResult<Vec<Document>> {
        let query = to_mongo_filter(filter)?;
        let options = FindOptions::builder().limit(limit).build();

        let cursor = self
            .db
            .collection::<bson::Document>(collection)
            .find(query)
            .with_options(options)
            .await?;
        let raw: Vec<bson::Document> = cursor.try_collect().await?;

        Ok(raw.into_iter().map(to_json_document).collect())
    }

    #[instrument(skip(self))]
    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.db.list_collection_names().await?)
    }

    fn database_name(&self) -> String {
        self.db.name().to_string()
    }
}

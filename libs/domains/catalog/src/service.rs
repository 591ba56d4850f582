//! Catalog Service - Business logic layer

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::diagnostics::{DiagnosticsReport, EnvPresence, run_diagnostics};
use crate::error::{CatalogError, CatalogResult};
use crate::filter::Filter;
use crate::models::{
    CATEGORY_COLLECTION, Category, CategoryQuery, CreateProduct, PRODUCT_COLLECTION, ProductQuery,
    SchemaResponse,
};
use crate::store::{Document, DocumentStore, into_item};

/// Catalog operations over an optional document store.
///
/// Without a store every persistence operation fails with
/// [`CatalogError::DatabaseUnavailable`]; diagnostics still answer.
pub struct CatalogService<S: DocumentStore> {
    store: Option<Arc<S>>,
    env: EnvPresence,
}

impl<S: DocumentStore> CatalogService<S> {
    pub fn new(store: Option<S>, env: EnvPresence) -> Self {
        Self {
            store: store.map(Arc::new),
            env,
        }
    }

    /// Service backed by `store`, reporting both store variables as set.
    pub fn with_store(store: S) -> Self {
        Self::new(
            Some(store),
            EnvPresence {
                database_url: true,
                database_name: true,
            },
        )
    }

    /// Service with no store configured.
    pub fn without_store(env: EnvPresence) -> Self {
        Self::new(None, env)
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> CatalogResult<&S> {
        self.store
            .as_deref()
            .ok_or(CatalogError::DatabaseUnavailable)
    }

    async fn list(&self, collection: &str, filter: Filter, limit: i64) -> CatalogResult<Vec<Document>> {
        let docs = self.store()?.get_documents(collection, &filter, limit).await?;
        Ok(docs.into_iter().map(into_item).collect())
    }

    async fn insert<T: Serialize>(&self, collection: &str, payload: &T) -> CatalogResult<String> {
        let store = self.store()?;
        let document = match serde_json::to_value(payload)? {
            Value::Object(map) => map,
            other => {
                return Err(CatalogError::Internal(format!(
                    "expected an object payload, got {}",
                    other
                )));
            }
        };

        Ok(store.create_document(collection, document).await?)
    }

    /// List products matching the optional category and search text.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> CatalogResult<Vec<Document>> {
        query.validate()?;
        self.list(PRODUCT_COLLECTION, query.filter(), query.limit).await
    }

    #[instrument(skip(self, input), fields(title = %input.title, category = %input.category))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<String> {
        input.validate()?;
        let id = self.insert(PRODUCT_COLLECTION, &input).await?;
        tracing::info!(product_id = %id, "Product created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self, query: CategoryQuery) -> CatalogResult<Vec<Document>> {
        query.validate()?;
        self.list(CATEGORY_COLLECTION, Filter::All, query.limit).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: Category) -> CatalogResult<String> {
        input.validate()?;
        let id = self.insert(CATEGORY_COLLECTION, &input).await?;
        tracing::info!(category_id = %id, "Category created");
        Ok(id)
    }

    pub async fn diagnostics(&self) -> DiagnosticsReport {
        run_diagnostics(self.store.as_deref(), self.env).await
    }

    pub fn schemas(&self) -> CatalogResult<SchemaResponse> {
        Ok(SchemaResponse::generate()?)
    }
}

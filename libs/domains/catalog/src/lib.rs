//! Catalog Domain
//!
//! Products and categories kept as schemaless documents, plus the
//! connectivity report and payload schemas served next to them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/products, /categories, /test, /schema)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, id mapping, "no database" handling
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │DocumentStore│  ← Trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Filter    │  ← Store-neutral query description
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{CatalogService, MongoDocumentStore, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let store = MongoDocumentStore::new(client.database("store"));
//!
//! let service = CatalogService::with_store(store);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod service;
pub mod store;

pub use diagnostics::{DiagnosticsReport, EnvPresence, run_diagnostics};
pub use error::{CatalogError, CatalogResult, DATABASE_UNAVAILABLE, StoreError, StoreResult};
pub use filter::Filter;
pub use handlers::ApiDoc;
pub use memory::InMemoryDocumentStore;
pub use models::{
    Category, CategoryQuery, CreateProduct, CreatedResponse, ItemsResponse, ProductQuery,
    SchemaResponse,
};
pub use crate::mongodb::MongoDocumentStore;
pub use service::CatalogService;
pub use store::{Document, DocumentStore, into_item};

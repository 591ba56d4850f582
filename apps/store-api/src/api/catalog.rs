//! Catalog API routes
//!
//! Wires the catalog domain to the configured MongoDB database, or to no
//! store at all when the database settings are missing.

use axum::Router;
use domain_catalog::{CatalogService, EnvPresence, MongoDocumentStore, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let store = state.database().map(MongoDocumentStore::new);
    if store.is_none() {
        tracing::warn!("No database configured; catalog endpoints will report it as unavailable");
    }

    handlers::router(CatalogService::new(store, EnvPresence::from_env()))
}

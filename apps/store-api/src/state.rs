//! Application state management.
//!
//! Shared state handed to the app-level routes. The catalog routes carry
//! their own state (the catalog service) built from this.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned per handler; the MongoDB client shares its connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, absent when no database is configured
    pub mongo_client: Option<Client>,
}

impl AppState {
    /// The configured database, when there is a client to reach it.
    pub fn database(&self) -> Option<Database> {
        let client = self.mongo_client.as_ref()?;
        let config = self.config.mongodb.as_ref()?;
        Some(client.database(&config.database))
    }
}

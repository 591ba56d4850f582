//! Connectivity report served by `GET /test`.
//!
//! Never fails: every problem is folded into the report's status strings.

use core_config::env_is_set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::DocumentStore;

pub const BACKEND_RUNNING: &str = "✅ Running";
pub const DATABASE_NOT_AVAILABLE: &str = "❌ Not Available";
pub const DATABASE_AVAILABLE: &str = "✅ Available";
pub const DATABASE_WORKING: &str = "✅ Connected & Working";
pub const DATABASE_NOT_INITIALIZED: &str = "⚠️  Available but not initialized";
pub const CONNECTED: &str = "Connected";
pub const NOT_CONNECTED: &str = "Not Connected";
pub const VAR_SET: &str = "✅ Set";
pub const VAR_NOT_SET: &str = "❌ Not Set";

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

/// Whether the store's environment variables were provided. Values are never kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvPresence {
    pub database_url: bool,
    pub database_name: bool,
}

impl EnvPresence {
    pub fn from_env() -> Self {
        Self {
            database_url: env_is_set("DATABASE_URL"),
            database_name: env_is_set("DATABASE_NAME"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    /// First collection names reported by the store
    pub collections: Vec<String>,
}

fn presence(set: bool) -> String {
    (if set { VAR_SET } else { VAR_NOT_SET }).to_string()
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Probe the store (if any) and describe what was found.
pub async fn run_diagnostics<S>(store: Option<&S>, env: EnvPresence) -> DiagnosticsReport
where
    S: DocumentStore + ?Sized,
{
    let mut report = DiagnosticsReport {
        backend: BACKEND_RUNNING.to_string(),
        database: DATABASE_NOT_AVAILABLE.to_string(),
        database_url: presence(env.database_url),
        database_name: presence(env.database_name),
        connection_status: NOT_CONNECTED.to_string(),
        collections: Vec::new(),
    };

    let Some(store) = store else {
        report.database = DATABASE_NOT_INITIALIZED.to_string();
        return report;
    };

    report.database = DATABASE_AVAILABLE.to_string();
    report.connection_status = CONNECTED.to_string();

    match store.list_collection_names().await {
        Ok(names) => {
            report.collections = names.into_iter().take(MAX_COLLECTIONS).collect();
            report.database = DATABASE_WORKING.to_string();
        }
        Err(e) => {
            tracing::warn!(database = %store.database_name(), error = %e, "Diagnostics could not list collections");
            let text = e.to_string();
            report.database = format!(
                "⚠️  Connected but Error: {}",
                truncate_chars(&text, MAX_ERROR_CHARS)
            );
        }
    }

    report
}

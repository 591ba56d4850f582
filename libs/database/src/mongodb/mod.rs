//! MongoDB connector and utilities
//!
//! Provides configuration, connection management and health checks.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{MongoError, connect_from_config, connect_from_config_with_retry, connect_lazy};
pub use health::{HealthStatus, check_health};

pub use mongodb::{Client, Collection, Database};

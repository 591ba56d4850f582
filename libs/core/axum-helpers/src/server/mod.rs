//! Server infrastructure: router assembly with OpenAPI docs, health
//! endpoints and graceful shutdown.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{ServiceInfo, create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes)?
//!     .merge(health_router(ServiceInfo { name: "store-api", version: "0.1.0" }));
//!
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{
    HealthCheckFuture, HealthResponse, ServiceInfo, health_router, run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};

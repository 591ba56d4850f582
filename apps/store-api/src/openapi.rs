//! OpenAPI documentation configuration

use axum_helpers::errors::responses::NotFoundResponse;
use utoipa::OpenApi;

use crate::api::{health, root};

/// App-level endpoints: root, hello and readiness.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store API",
        version = "0.1.0",
        description = "Products and categories over a MongoDB document store"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(root::root, root::hello, health::readiness_check),
    components(
        schemas(root::MessageResponse),
        responses(NotFoundResponse)
    ),
    tags(
        (name = "Root", description = "Service banner and greeting"),
        (name = "Health", description = "Readiness probe")
    )
)]
struct AppDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = AppDoc::openapi();
        doc.merge(domain_catalog::ApiDoc::openapi());
        doc
    }
}

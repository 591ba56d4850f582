use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestJsonResponse, BadRequestQueryResponse, BadRequestValidationResponse,
        InternalServerErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::diagnostics::DiagnosticsReport;
use crate::error::CatalogResult;
use crate::models::{
    Category, CategoryQuery, CreateProduct, CreatedResponse, ItemsResponse, ProductQuery,
    SchemaResponse,
};
use crate::service::CatalogService;
use crate::store::DocumentStore;

/// OpenAPI documentation for the catalog endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        diagnostics,
        schemas,
        list_products,
        create_product,
        list_categories,
        create_category,
    ),
    components(
        schemas(
            CreateProduct,
            Category,
            ItemsResponse,
            CreatedResponse,
            SchemaResponse,
            DiagnosticsReport
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestJsonResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product listing and creation (MongoDB)"),
        (name = "Categories", description = "Category listing and creation (MongoDB)"),
        (name = "Diagnostics", description = "Store connectivity and payload schemas")
    )
)]
pub struct ApiDoc;

/// Create the catalog router. Paths are absolute; merge it at the root.
pub fn router<S: DocumentStore + 'static>(service: CatalogService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/test", get(diagnostics::<S>))
        .route("/schema", get(schemas::<S>))
        .route("/products", get(list_products::<S>).post(create_product::<S>))
        .route(
            "/categories",
            get(list_categories::<S>).post(create_category::<S>),
        )
        .with_state(shared_service)
}

/// Report backend and database connectivity
#[utoipa::path(
    get,
    path = "/test",
    tag = "Diagnostics",
    responses(
        (status = 200, description = "Connectivity report", body = DiagnosticsReport)
    )
)]
async fn diagnostics<S: DocumentStore>(
    State(service): State<Arc<CatalogService<S>>>,
) -> Json<DiagnosticsReport> {
    Json(service.diagnostics().await)
}

/// JSON Schemas of the product and category payloads
#[utoipa::path(
    get,
    path = "/schema",
    tag = "Diagnostics",
    responses(
        (status = 200, description = "Payload schemas", body = SchemaResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn schemas<S: DocumentStore>(
    State(service): State<Arc<CatalogService<S>>>,
) -> CatalogResult<Json<SchemaResponse>> {
    Ok(Json(service.schemas()?))
}

/// List products by category and/or free-text search
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products", body = ItemsResponse),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<S: DocumentStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> CatalogResult<Json<ItemsResponse>> {
    let items = service.list_products(query).await?;
    Ok(Json(ItemsResponse { items }))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = CreatedResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: DocumentStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let id = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Stored categories", body = ItemsResponse),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<S: DocumentStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedQuery(query): ValidatedQuery<CategoryQuery>,
) -> CatalogResult<Json<ItemsResponse>> {
    let items = service.list_categories(query).await?;
    Ok(Json(ItemsResponse { items }))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    request_body = Category,
    responses(
        (status = 201, description = "Category created", body = CreatedResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<S: DocumentStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedJson(input): ValidatedJson<Category>,
) -> CatalogResult<impl IntoResponse> {
    let id = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

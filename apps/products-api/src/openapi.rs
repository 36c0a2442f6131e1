//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API Rust / Axum / Sea-ORM",
        version = "1.0.0",
        description = "API Docs for Products"
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "API operations related to products")
    )
)]
pub struct ApiDoc;

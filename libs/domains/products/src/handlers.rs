//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    Validated,
    errors::handlers::route_not_found,
    errors::responses::{
        InternalServerErrorResponse, MalformedJsonResponse, NotFoundResponse,
        TooManyRequestsResponse, ValidationErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    MessageResponse, NewProduct, Product, ProductCreatedResponse, ProductListResponse,
    ProductResponse, ProductUpdate,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::validation::{ProductId, UpdateProductRequest};

pub const CREATED_MESSAGE: &str = "Producto creado correctamente";
pub const UPDATED_MESSAGE: &str = "Producto actualizado correctamente";
pub const DELETED_MESSAGE: &str = "Producto eliminado";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        toggle_availability,
        delete_product,
    ),
    components(
        schemas(
            Product, NewProduct, ProductUpdate, ProductResponse, ProductListResponse,
            ProductCreatedResponse, MessageResponse
        ),
        responses(
            ValidationErrorResponse,
            MalformedJsonResponse,
            NotFoundResponse,
            TooManyRequestsResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(toggle_availability)
                .delete(delete_product),
        )
        .method_not_allowed_fallback(route_not_found)
        .with_state(shared_service)
}

/// List every product, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = ProductListResponse),
        (status = 429, response = TooManyRequestsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<ProductListResponse>> {
    let products = service.list_products().await?;
    Ok(Json(ProductListResponse {
        data: products.into_iter().map(Product::without_timestamps).collect(),
    }))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductCreatedResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 429, response = TooManyRequestsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(input): Validated<NewProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            data: product,
            msg: CREATED_MESSAGE.to_string(),
        }),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(ProductId(id)): Validated<ProductId>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse {
        data: product.without_timestamps(),
    }))
}

/// Replace a product's name, price and availability
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated successfully", body = MessageResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(request): Validated<UpdateProductRequest>,
) -> ProductResult<Json<MessageResponse>> {
    service.update_product(request.id, request.update).await?;
    Ok(Json(MessageResponse::new(UPDATED_MESSAGE)))
}

/// Flip a product's availability
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Availability toggled", body = ProductResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toggle_availability<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(ProductId(id)): Validated<ProductId>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.toggle_availability(id).await?;
    Ok(Json(ProductResponse {
        data: product.without_created_at(),
    }))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(ProductId(id)): Validated<ProductId>,
) -> ProductResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}

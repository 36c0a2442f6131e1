//! API routes module

pub mod health;
pub mod limits;

use axum::{Json, Router, middleware, routing::get};
use axum_helpers::rate_limit;
use axum_helpers::server::{RouterConfig, create_router, health_router};
use core_config::AppInfo;
use domain_products::{ProductRepository, ProductService, handlers};
use serde_json::{Value, json};

use crate::openapi::ApiDoc;
use crate::state::AppState;
use limits::RateLimits;

async fn api_root() -> Json<Value> {
    Json(json!({ "msg": "Desde api" }))
}

/// Routes nested under `/api`
pub fn routes<R: ProductRepository + 'static>(
    products: ProductService<R>,
    limits: &RateLimits,
) -> Router {
    let products = handlers::router(products)
        .layer(middleware::from_fn_with_state(limits.create.clone(), rate_limit))
        .layer(middleware::from_fn_with_state(limits.writes.clone(), rate_limit));

    Router::new()
        .route("/", get(api_root))
        .nest("/products", products)
        .layer(middleware::from_fn_with_state(limits.general.clone(), rate_limit))
}

/// The complete application router
pub fn app<R: ProductRepository + 'static>(
    app_info: AppInfo,
    root: Router,
    products: ProductService<R>,
    limits: &RateLimits,
    router_config: &RouterConfig,
) -> Router {
    let root = health_router(app_info).merge(root);
    create_router::<ApiDoc>(root, routes(products, limits), router_config)
}

/// Application router backed by the PostgreSQL state
pub fn router(state: &AppState, limits: &RateLimits) -> Router {
    let config = &state.config;
    let router_config = RouterConfig::new(config.environment, config.allowed_origins.clone());

    app(
        config.app.clone(),
        health::router(state.db.clone()),
        state.products.clone(),
        limits,
        &router_config,
    )
}

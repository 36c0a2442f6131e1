use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{ErrorHandlerConfig, error_handler, panic_response, route_not_found};
use crate::http::cors::{AllowedOrigins, create_cors_layer, reject_foreign_origin};
use crate::http::security::security_headers;
use axum::{Router, http::HeaderValue, middleware};
use core_config::Environment;
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Cross-cutting settings for [`create_router`].
#[derive(Clone, Debug)]
pub struct RouterConfig {
    pub environment: Environment,
    /// Browser origins allowed to call the API
    pub allowed_origins: Vec<HeaderValue>,
}

impl RouterConfig {
    pub fn new(environment: Environment, allowed_origins: Vec<HeaderValue>) -> Self {
        Self {
            environment,
            allowed_origins,
        }
    }
}

/// Assemble the application router.
///
/// - `root` routes are mounted as-is (health, readiness).
/// - `apis` is nested under `/api`.
/// - Swagger UI at `/docs`, plus ReDoc, RapiDoc and Scalar, all reading `T`.
///
/// Every route, the unmatched-route fallback included, goes through the same
/// stack: origin check, panic capture, error finalization, tracing, security
/// headers, CORS and compression (innermost first).
pub fn create_router<T>(root: Router, apis: Router, config: &RouterConfig) -> Router
where
    T: OpenApi + 'static,
{
    info!(
        origins = ?config.allowed_origins,
        environment = config.environment.as_str(),
        "Configuring router"
    );

    Router::new()
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(root)
        .nest("/api", apis)
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(
            AllowedOrigins::new(config.allowed_origins.clone()),
            reject_foreign_origin,
        ))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            ErrorHandlerConfig::new(config.environment),
            error_handler,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer(config.allowed_origins.clone()))
        .layer(CompressionLayer::new())
}

/// Serve `router` until `coordinator` shuts down, then run `cleanup`.
///
/// SIGINT/SIGTERM trigger the coordinator; other tasks (background jobs)
/// subscribe to the same coordinator. In-flight requests drain before
/// `cleanup` runs, and `cleanup` is abandoned after `shutdown_timeout`.
/// Client addresses are exposed through `ConnectInfo<SocketAddr>`.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = server_config
        .socket_addr()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_handle = coordinator.clone();
    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    let drain = coordinator.clone();
    let serve_result = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { drain.wait().await })
    .await
    .inspect_err(|e| {
        tracing::error!("Server encountered an error: {:?}", e);
    });

    // Stop background tasks even when the server itself failed.
    coordinator.shutdown();

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly with API docs, health checks, graceful shutdown
//! - **[`http`]**: CORS, security headers, per-IP rate limiting
//! - **[`errors`]**: Handler errors and the terminal `{status, message}` error handler
//! - **[`validation`]**: Ordered field validation chains
//! - **[`extractors`]**: The [`Validated`] extractor running those chains
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{RouterConfig, create_router, health_router};
//! use core_config::{Environment, app_info};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let config = RouterConfig::new(Environment::from_env(), origins);
//! let router = create_router::<ApiDoc>(health_router(app_info!()), api_routes, &config);
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, RouterConfig, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{
    AllowedOrigins, RateLimit, RateLimitScope, create_cors_layer, parse_origins, rate_limit,
    security_headers,
};

// Re-export error types
pub use errors::{AppError, ErrorResponse, GENERIC_ERROR_MESSAGE, HttpError, HttpErrorBody};

// Re-export validation
pub use extractors::{FromValidated, Validated};
pub use validation::{FieldChain, FieldError, Location, RequestInput, ValidationErrors, validate};

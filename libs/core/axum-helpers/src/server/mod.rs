//! Server infrastructure: router assembly, health endpoints and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{RouterConfig, create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(health_router(app_info!()), api_routes, &router_config);
//! create_production_app(router, &server_config, coordinator, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_JSON_PATH, RouterConfig, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_handler, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};

//! Products API - REST server and maintenance commands

use axum_helpers::server::{ShutdownCoordinator, create_production_app};
use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{close, connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod scheduler;
mod state;

use api::limits::RateLimits;
use config::{Config, Environment};
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "products_api")]
#[command(about = "Products inventory REST API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Default)]
enum Commands {
    /// Run the HTTP server (default)
    #[default]
    Serve,

    /// Remove every product, restart ids at 1 and exit
    Clear,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let cli = Cli::parse();

    let (environment, unknown) = Environment::detect();
    init_tracing(&environment);
    if let Some(value) = unknown {
        warn!(
            value = %value,
            "Unknown environment, expected development, production or test; using development"
        );
    }

    let config = Config::from_env()?;

    info!(
        app = config.app.name,
        version = config.app.version,
        environment = config.environment.as_str(),
        "Starting Products API"
    );

    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState::new(config, db);

    match cli.command.unwrap_or_default() {
        Commands::Serve => serve(state).await,
        Commands::Clear => {
            let removed = state.products.clear_products().await?;
            info!(removed, "Products table cleared, ids restart at 1");
            close(state.db).await;
            Ok(())
        }
    }
}

async fn serve(state: AppState) -> eyre::Result<()> {
    let coordinator = ShutdownCoordinator::new();

    let cleanup_job =
        scheduler::start(state.products.clone(), state.config.cleanup_enabled()).await?;

    let limits = RateLimits::default();
    limits.spawn_pruning(coordinator.clone());

    let router = api::router(&state, &limits);

    info!(
        "Starting Products API on {}:{}",
        state.config.server.host, state.config.server.port
    );

    let db = state.db.clone();
    create_production_app(
        router,
        &state.config.server,
        coordinator,
        SHUTDOWN_TIMEOUT,
        async move {
            if let Some(job) = cleanup_job {
                scheduler::stop(job).await;
            }
            info!("Shutting down: closing PostgreSQL connections");
            close(db).await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Open a pooled connection using `config`.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let target = config.redacted_url();
    let db = Database::connect(config.into_connect_options()).await?;
    info!(url = %target, "Connected to PostgreSQL");
    Ok(db)
}

/// Like [`connect_from_config`], retrying with backoff while the server comes up.
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    retry_with_backoff(
        || connect_from_config(config.clone()),
        retry_config.unwrap_or_default(),
    )
    .await
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}

/// Close the pool, logging instead of failing.
pub async fn close(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => info!("PostgreSQL connection pool closed"),
        Err(e) => tracing::warn!(error = %e, "Failed to close PostgreSQL pool cleanly"),
    }
}

//! Database connectivity for the products service.
//!
//! # Features
//!
//! - `postgres` (default): PostgreSQL through SeaORM, plus migration runner
//! - `config`: load [`postgres::PostgresConfig`] with `core_config::FromEnv`
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "products_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

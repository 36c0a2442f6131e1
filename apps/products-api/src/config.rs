//! Configuration for Products API

use axum::http::HeaderValue;
use axum_helpers::parse_origins;
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_flag, require_vars, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Comma-separated list of browser origins allowed by CORS.
pub const FRONTEND_URL_VAR: &str = "FRONTEND_URL";
pub const AUTO_CLEANUP_VAR: &str = "ENABLE_AUTO_CLEANUP";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub allowed_origins: Vec<HeaderValue>,
    /// `ENABLE_AUTO_CLEANUP=true`; production enables cleanup regardless
    pub auto_cleanup: bool,
}

impl Config {
    /// Load and validate the whole configuration.
    ///
    /// Every missing required variable is reported in one error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        require_vars(&[PostgresConfig::url_var(environment), FRONTEND_URL_VAR])?;

        Ok(Self {
            app: app_info!(),
            environment,
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
            allowed_origins: allowed_origins()?,
            auto_cleanup: env_flag(AUTO_CLEANUP_VAR),
        })
    }

    /// Whether the nightly cleanup job runs.
    pub fn cleanup_enabled(&self) -> bool {
        self.environment.is_production() || self.auto_cleanup
    }
}

fn allowed_origins() -> Result<Vec<HeaderValue>, ConfigError> {
    let raw = core_config::env_required(FRONTEND_URL_VAR)?;
    let parse_error = |details: String| ConfigError::ParseError {
        key: FRONTEND_URL_VAR.to_string(),
        details,
    };

    let origins = parse_origins(&raw).map_err(|e| parse_error(e.to_string()))?;
    if origins.is_empty() {
        return Err(parse_error("no origins listed".to_string()));
    }
    Ok(origins)
}

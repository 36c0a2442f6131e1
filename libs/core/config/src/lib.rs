pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Required environment variables are not set: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment.
///
/// Read from `APP_ENV`, falling back to `NODE_ENV` so existing deployment
/// manifests keep working.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// Unknown values fall back to development.
    pub fn from_env() -> Self {
        Self::detect().0
    }

    /// Like [`from_env`](Self::from_env), but also hands back an unrecognised
    /// value so it can be reported once logging is installed.
    pub fn detect() -> (Self, Option<String>) {
        let raw = env::var("APP_ENV")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        match Self::parse(&raw) {
            Some(environment) => (environment, None),
            None => (Environment::Development, Some(raw)),
        }
    }

    /// Parse an environment name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            "test" => Some(Environment::Test),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Environment::Test)
    }
}

/// Name and version reported by health endpoints and startup logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Build an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// `true` only when the variable is set to "true" (any case) or "1".
pub fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
        .unwrap_or(false)
}

/// Check that every listed variable is set and non-empty.
///
/// All missing names are reported together.
pub fn require_vars(keys: &[&str]) -> Result<(), ConfigError> {
    let missing: Vec<String> = keys
        .iter()
        .filter(|key| env::var(key).map(|v| v.trim().is_empty()).unwrap_or(true))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingEnvVars(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_vars_unset(["APP_ENV", "NODE_ENV"], || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
            assert!(!env.is_test());
        });
    }

    #[test]
    fn test_environment_production() {
        temp_env::with_vars([("APP_ENV", Some("production")), ("NODE_ENV", None)], || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Production);
            assert!(env.is_production());
            assert!(!env.is_development());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });
    }

    #[test]
    fn test_environment_falls_back_to_node_env() {
        temp_env::with_vars([("APP_ENV", None), ("NODE_ENV", Some("test"))], || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Test);
            assert_eq!(env.as_str(), "test");
        });
    }

    #[test]
    fn test_app_env_wins_over_node_env() {
        temp_env::with_vars(
            [("APP_ENV", Some("production")), ("NODE_ENV", Some("test"))],
            || {
                assert_eq!(Environment::from_env(), Environment::Production);
            },
        );
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_vars([("APP_ENV", Some("staging")), ("NODE_ENV", None)], || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_detect_returns_unknown_value() {
        temp_env::with_vars([("APP_ENV", Some("staging")), ("NODE_ENV", None)], || {
            assert_eq!(
                Environment::detect(),
                (Environment::Development, Some("staging".to_string()))
            );
        });

        temp_env::with_vars([("APP_ENV", None), ("NODE_ENV", Some("Production"))], || {
            assert_eq!(Environment::detect(), (Environment::Production, None));
        });

        temp_env::with_vars_unset(["APP_ENV", "NODE_ENV"], || {
            assert_eq!(Environment::detect(), (Environment::Development, None));
        });
    }

    #[test]
    fn test_app_info_macro_uses_crate_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn test_env_or_default_with_value() {
        temp_env::with_var("TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("TEST_VAR", "default"), "test_value");
        });
    }

    #[test]
    fn test_env_or_default_without_value() {
        temp_env::with_var_unset("MISSING_VAR", || {
            assert_eq!(env_or_default("MISSING_VAR", "default_value"), "default_value");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("MISSING_REQUIRED", || {
            let err = env_required("MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_flag() {
        temp_env::with_var("FLAG_VAR", Some("TRUE"), || assert!(env_flag("FLAG_VAR")));
        temp_env::with_var("FLAG_VAR", Some("1"), || assert!(env_flag("FLAG_VAR")));
        temp_env::with_var("FLAG_VAR", Some("yes"), || assert!(!env_flag("FLAG_VAR")));
        temp_env::with_var_unset("FLAG_VAR", || assert!(!env_flag("FLAG_VAR")));
    }

    #[test]
    fn test_require_vars_reports_every_missing_key() {
        temp_env::with_vars(
            [
                ("REQ_A", Some("set")),
                ("REQ_B", None),
                ("REQ_C", Some("  ")),
            ],
            || {
                let err = require_vars(&["REQ_A", "REQ_B", "REQ_C"]).unwrap_err();
                match err {
                    ConfigError::MissingEnvVars(keys) => assert_eq!(keys, vec!["REQ_B", "REQ_C"]),
                    other => panic!("unexpected error: {other}"),
                }
            },
        );
    }

    #[test]
    fn test_require_vars_ok() {
        temp_env::with_var("REQ_PRESENT", Some("x"), || {
            assert!(require_vars(&["REQ_PRESENT"]).is_ok());
        });
    }
}

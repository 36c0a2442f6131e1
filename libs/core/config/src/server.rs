use crate::{env_or_default, ConfigError, FromEnv};
use std::net::{Ipv4Addr, SocketAddr};

/// Bind address of the HTTP server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolve the bind address; `localhost` maps to the loopback interface.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = if self.host.eq_ignore_ascii_case("localhost") {
            Ipv4Addr::LOCALHOST.to_string()
        } else {
            self.host.clone()
        };

        format!("{}:{}", host, self.port)
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "HOST".to_string(),
                details: format!("{}", e),
            })
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to Ipv4Addr::UNSPECIFIED (0.0.0.0 - all interfaces)
    /// - PORT: defaults to 8080
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_or_default("PORT", "8080").parse().map_err(|e| {
            ConfigError::ParseError {
                key: "PORT".to_string(),
                details: format!("{}", e),
            }
        })?;

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
        }
    }
}

use crate::{env_or_default, ConfigError, FromEnv};
use std::net::Ipv4Addr;

/// Server configuration for HTTP APIs
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

/// API surface configuration.
///
/// `prefix` is the path all resource routes are nested under,
/// e.g. `/api/v1/items` for the default prefix.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub prefix: String,
}

impl FromEnv for ApiConfig {
    /// Reads `API_PREFIX`, defaulting to `/api/v1`.
    fn from_env() -> Result<Self, ConfigError> {
        let prefix = env_or_default("API_PREFIX", "/api/v1");

        if !prefix.starts_with('/') || prefix.ends_with('/') {
            return Err(ConfigError::ParseError {
                key: "API_PREFIX".to_string(),
                details: format!(
                    "must start with '/' and must not end with '/' (got '{}')",
                    prefix
                ),
            });
        }

        Ok(Self { prefix })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: "/api/v1".to_string(),
        }
    }
}

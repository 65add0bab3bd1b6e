//! Environment-driven server configuration.

use std::net::SocketAddr;

use thiserror::Error;

/// Default bind address when `RELATA_BIND` is not provided.
const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP listener binds to.
    pub bind: SocketAddr,
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind address could not be parsed.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBind {
        /// The offending value.
        value: String,
        /// Underlying parse error.
        source: std::net::AddrParseError,
    },
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBind`] when `RELATA_BIND` is set but
    /// not a valid socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = std::env::var("RELATA_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind = value
            .parse()
            .map_err(|source| ConfigError::InvalidBind { value, source })?;
        Ok(Self { bind })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.parse().expect("default bind address parses"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_parses() {
        let config = AppConfig::default();
        assert_eq!(config.bind.port(), 8787);
    }
}

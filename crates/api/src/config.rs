//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPLEDGER_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `SHOPLEDGER_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPLEDGER_PORT` - Listen port (default: 8000)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 8000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `SHOPLEDGER_DATABASE_URL`
    /// is unset, and `ConfigError::InvalidEnvVar` if the host or port
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("SHOPLEDGER_DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("SHOPLEDGER_DATABASE_URL".to_owned()))?
            .into();

        let host = parse_or_default("SHOPLEDGER_HOST", DEFAULT_HOST)?;
        let port = parse_or_default("SHOPLEDGER_PORT", DEFAULT_PORT)?;

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// The socket address to bind the HTTP listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse an optional environment variable, falling back to a default when
/// the variable is unset.
fn parse_or_default<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar(name.to_owned(), raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = ApiConfig {
            database_url: "postgres://localhost/test".into(),
            host: DEFAULT_HOST,
            port: 9001,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9001");
    }
}

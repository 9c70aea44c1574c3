//! Server settings loaded via OrthoConfig.
//!
//! Layers CLI flags, `CATALOG_*` environment variables and configuration
//! files the way `ortho_config` does.

use std::env;
use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Invalid settings values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Values controlling how the server starts.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Falls back to `DATABASE_URL`; absent means the
    /// in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// [`SettingsError::BindAddr`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Configured database URL, else `DATABASE_URL`, ignoring blank values.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| env::var(DATABASE_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}

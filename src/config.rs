//! Configuration management and validation.
//!
//! Provides configuration structures for the record store (source file,
//! index threshold, cache size) and the HTTP server, populated from
//! defaults, then environment variables, then CLI overrides.

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CONTACTS_FILE, DEFAULT_CORS_ORIGINS, DEFAULT_HOST,
    DEFAULT_INDEX_THRESHOLD, DEFAULT_MEMORY_REPORT_SECS, DEFAULT_PORT, env,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// CSV file backing the store
    pub source_path: PathBuf,

    /// Record count above which lookups switch to the indexed path
    pub index_threshold: usize,

    /// Number of search results kept before the cache is flushed
    pub cache_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_CONTACTS_FILE),
            index_threshold: DEFAULT_INDEX_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Create configuration for the given source file
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            ..Default::default()
        }
    }

    /// Set the index activation threshold
    pub fn with_index_threshold(mut self, threshold: usize) -> Self {
        self.index_threshold = threshold;
        self
    }

    /// Set the search cache capacity
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(Error::configuration("Contacts file path cannot be empty"));
        }
        if self.cache_capacity == 0 {
            return Err(Error::configuration(
                "Cache capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// CORS allowed origins; empty means any origin
    pub cors_origins: Vec<String>,

    /// Public base URL, only used for startup logging
    pub api_url: String,

    /// Seconds between memory telemetry samples, 0 disables them
    pub memory_report_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            api_url: format!("http://localhost:{}", DEFAULT_PORT),
            memory_report_secs: DEFAULT_MEMORY_REPORT_SECS,
        }
    }
}

impl ServerConfig {
    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the bind host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Build configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// Unset or empty variables fall back to defaults; set but unparsable
    /// values are configuration errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let port = parse_var(&var, env::PORT, defaults.server.port)?;
        let server = ServerConfig {
            host: var(env::HOST).unwrap_or(defaults.server.host),
            port,
            cors_origins: var(env::CORS_ORIGINS)
                .map(|list| {
                    list.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.server.cors_origins),
            api_url: var(env::API_URL).unwrap_or_else(|| format!("http://localhost:{}", port)),
            memory_report_secs: parse_var(
                &var,
                env::MEMORY_REPORT_SECS,
                defaults.server.memory_report_secs,
            )?,
        };

        let store = StoreConfig {
            source_path: var(env::CONTACTS_FILE)
                .map(PathBuf::from)
                .unwrap_or(defaults.store.source_path),
            index_threshold: parse_var(
                &var,
                env::INDEX_THRESHOLD,
                defaults.store.index_threshold,
            )?,
            cache_capacity: parse_var(&var, env::CACHE_CAPACITY, defaults.store.cache_capacity)?,
        };

        let config = Self { store, server };
        debug!("Configuration from environment: {:?}", config);
        config.validate()?;
        Ok(config)
    }

    /// Validate the combined configuration
    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;
        if self.server.host.trim().is_empty() {
            return Err(Error::configuration("Server host cannot be empty"));
        }
        Ok(())
    }
}

fn parse_var<T, F>(var: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| {
            Error::configuration(format!("Invalid value '{}' for {}: {}", raw, name, e))
        }),
        None => Ok(default),
    }
}

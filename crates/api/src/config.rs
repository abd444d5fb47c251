//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the MedSync API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (optional, the in-memory store is used without it)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `SCHEDULE_CACHE_TTL_SECONDS`: Lifetime of a cached resolved schedule (default: 60)
//! - `SCHEDULER_MAX_ITERATIONS`: Local-search iteration cap (default: 16)

use eyre::{Result, WrapErr, eyre};
use medsync_core::scheduler::search::DEFAULT_MAX_ITERATIONS;
use std::env;
use tracing::Level;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT: u64 = 30;
const DEFAULT_CACHE_TTL: u64 = 60;

/// Configuration for the MedSync API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use medsync_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Seconds a resolved schedule stays cached. Zero disables caching.
    pub cache_ttl: u64,

    /// Upper bound on local-search iterations per recomputation
    pub max_iterations: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - SCHEDULER_MAX_ITERATIONS is not a positive integer
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("API_PORT") {
            Some(port) => port.parse().wrap_err("Invalid API_PORT value")?,
            None => DEFAULT_PORT,
        };

        // Database settings
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let cache_ttl = lookup("SCHEDULE_CACHE_TTL_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL);

        // Scheduler settings
        let max_iterations = match lookup("SCHEDULER_MAX_ITERATIONS") {
            Some(value) => value
                .parse()
                .wrap_err("Invalid SCHEDULER_MAX_ITERATIONS value")?,
            None => DEFAULT_MAX_ITERATIONS,
        };
        if max_iterations == 0 {
            return Err(eyre!("SCHEDULER_MAX_ITERATIONS must be at least 1"));
        }

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            cache_ttl,
            max_iterations,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

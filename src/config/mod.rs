//! Configuration management for dbptools
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. The resulting [`Config`] is an immutable value
//! handed to [`QueryClient::from_config`](crate::sparql::QueryClient::from_config).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Public DBpedia SPARQL endpoint
pub const DEFAULT_ENDPOINT: &str = "http://dbpedia.org/sparql";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SPARQL endpoint configuration
    pub sparql: SparqlConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// SPARQL endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SparqlConfig {
    /// Endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,

    /// Log full query texts at info level
    pub verbose: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(DEFAULT_ENDPOINT),
            request_timeout_secs: 30,
            user_agent: format!("dbptools/{}", env!("CARGO_PKG_VERSION")),
            verbose: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl SparqlConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = SparqlConfig::default();

        let endpoint =
            std::env::var("DBPTOOLS_ENDPOINT").unwrap_or_else(|_| defaults.endpoint.clone());

        let request_timeout_secs = std::env::var("DBPTOOLS_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let user_agent =
            std::env::var("DBPTOOLS_USER_AGENT").unwrap_or_else(|_| defaults.user_agent.clone());

        let verbose = std::env::var("DBPTOOLS_VERBOSE")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.verbose);

        let level = std::env::var("DBPTOOLS_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let format = std::env::var("DBPTOOLS_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            sparql: SparqlConfig {
                endpoint,
                request_timeout_secs,
                user_agent,
                verbose,
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.sparql.endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", self.sparql.endpoint))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("endpoint must be an http(s) URL, got {}", endpoint.scheme());
        }

        if reqwest::header::HeaderValue::from_str(&self.sparql.user_agent).is_err() {
            anyhow::bail!("user_agent is not a valid HTTP header value");
        }

        if self.sparql.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be 'text' or 'json', got '{}'", self.logging.format);
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

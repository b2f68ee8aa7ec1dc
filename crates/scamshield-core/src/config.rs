//! Configuration management for `ScamShield`

use crate::search::DEFAULT_DROPDOWN_LIMIT;
use crate::types::DEFAULT_SCENARIO;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Relative base path used when no API URL is configured
pub const DEFAULT_API_BASE: &str = "/api";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SCAMSHIELD";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Search and autocomplete configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Call simulation configuration
    #[serde(default)]
    pub calls: CallConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API; `None` falls back to `/api`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Origin a relative base URL is resolved against
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Request timeout in seconds; `None` keeps the transport default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Optional API key sent as `X-API-Key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of dropdown suggestions
    #[serde(default = "default_dropdown_limit")]
    pub dropdown_limit: usize,

    /// Quiet period before a typed query is applied; 0 disables debouncing
    #[serde(default)]
    pub debounce_ms: u64,
}

/// Call simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallConfig {
    /// Scenario used when none is chosen
    #[serde(default = "default_scenario")]
    pub default_scenario: String,

    /// Response statuses treated as a successful call initiation
    #[serde(default = "default_success_statuses")]
    pub success_statuses: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_origin() -> String {
    "http://localhost:8000".to_string()
}

const fn default_dropdown_limit() -> usize {
    DEFAULT_DROPDOWN_LIMIT
}

fn default_scenario() -> String {
    DEFAULT_SCENARIO.to_string()
}

fn default_success_statuses() -> Vec<String> {
    vec!["success".to_string(), "initiated".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            origin: default_origin(),
            request_timeout_secs: None,
            api_key: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dropdown_limit: default_dropdown_limit(),
            debounce_ms: 0,
        }
    }
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            default_scenario: default_scenario(),
            success_statuses: default_success_statuses(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ApiConfig {
    /// Configured base URL, or `/api` when unset or blank
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
    }

    /// Absolute base URL with relative paths joined onto `origin`
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        let base = self.base_url().trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            base.to_string()
        } else {
            format!(
                "{}/{}",
                self.origin.trim_end_matches('/'),
                base.trim_start_matches('/')
            )
        }
    }
}

impl Config {
    /// Load configuration from an optional `scamshield` file and
    /// `SCAMSHIELD_`-prefixed environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        Self::build(config::File::with_name("scamshield").required(false))
    }

    /// Load configuration from an explicit file, still honouring environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid.
    pub fn load_from(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> crate::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("calls.success_statuses")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        tracing::debug!(
            base_url = %config.api.base_url(),
            dropdown_limit = config.search.dropdown_limit,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check cross-field constraints that serde defaults cannot express
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.search.dropdown_limit == 0 {
            return Err(crate::Error::validation(
                "search.dropdown_limit",
                "must be at least 1",
            ));
        }
        if self.calls.default_scenario.trim().is_empty() {
            return Err(crate::Error::validation(
                "calls.default_scenario",
                "must not be empty",
            ));
        }
        if !matches!(self.logging.format.as_str(), "json" | "text") {
            return Err(crate::Error::validation(
                "logging.format",
                format!("unknown format '{}'", self.logging.format),
            ));
        }
        Ok(())
    }
}

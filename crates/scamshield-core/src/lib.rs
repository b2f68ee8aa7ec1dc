//! Core types and utilities for the `ScamShield` training dashboard

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod search;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::{ApiConfig, CallConfig, Config, LoggingConfig, SearchConfig};
pub use error::{Error, Result};
pub use search::{EmployeeSearch, dropdown_results, filter_employees};
pub use types::{
    CallSimulationRequest, CallSimulationResponse, CallStatus, Employee, EmployeeId, Level,
    SecurityAssessment,
};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format == "text" {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_only_once() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "text".to_string(),
        };
        let first = init_logging(&config);
        let second = init_logging(&config);

        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::Logging(_))));
    }
}

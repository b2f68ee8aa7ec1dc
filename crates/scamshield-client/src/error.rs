//! Client error types

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed cause kept behind a client error
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to callers of the API client
///
/// Transport failures never escape raw: every operation wraps them in one of
/// these variants with a message naming the operation and entity.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A read operation failed
    #[error("{message}")]
    Fetch {
        /// Operation-specific message
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxError>,
    },

    /// The call simulation request failed
    #[error("{message}")]
    Simulation {
        /// Server-provided or derived message
        message: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Underlying cause
        #[source]
        source: Option<BoxError>,
    },

    /// The client could not be constructed
    #[error("Invalid client configuration: {message}")]
    Configuration {
        /// Error message
        message: String,
    },
}

impl ClientError {
    /// Create a fetch error wrapping `cause`
    pub fn fetch(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self::Fetch {
            message: message.into(),
            source: Some(cause.into()),
        }
    }

    /// Create a simulation error
    pub fn simulation(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Simulation {
            message: message.into(),
            status,
            source: None,
        }
    }

    /// Create a simulation error wrapping `cause`
    pub fn simulation_caused_by(
        message: impl Into<String>,
        status: Option<u16>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::Simulation {
            message: message.into(),
            status,
            source: Some(cause.into()),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this is a fetch error
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Whether this is a simulation error
    #[must_use]
    pub const fn is_simulation(&self) -> bool {
        matches!(self, Self::Simulation { .. })
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Simulation { status, .. } => *status,
            Self::Fetch { source, .. } => source
                .as_deref()
                .and_then(|s| s.downcast_ref::<HttpStatusError>())
                .map(|e| e.status),
            Self::Configuration { .. } => None,
        }
    }
}

/// Non-success HTTP response kept as the cause of a fetch error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("server responded with HTTP {status}{}", detail_suffix(.detail))]
pub struct HttpStatusError {
    /// HTTP status code
    pub status: u16,
    /// Error detail extracted from the body
    pub detail: Option<String>,
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn test_fetch_error_displays_message_only() {
        let error = ClientError::fetch(
            "Failed to fetch employees",
            HttpStatusError {
                status: 503,
                detail: None,
            },
        );

        assert_eq!(error.to_string(), "Failed to fetch employees");
        assert!(error.is_fetch());
        assert!(!error.is_simulation());
        assert_eq!(error.http_status(), Some(503));
        assert_eq!(
            error.source().map(ToString::to_string),
            Some("server responded with HTTP 503".to_string())
        );
    }

    #[test]
    fn test_simulation_error() {
        let error = ClientError::simulation("employee not found", Some(500));

        assert_eq!(error.to_string(), "employee not found");
        assert!(error.is_simulation());
        assert_eq!(error.http_status(), Some(500));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_http_status_error_display() {
        let error = HttpStatusError {
            status: 404,
            detail: Some("Employee with ID 7 not found".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "server responded with HTTP 404: Employee with ID 7 not found"
        );
    }

    #[test]
    fn test_configuration_error() {
        let error = ClientError::configuration("relative URL without a base");
        assert_eq!(
            error.to_string(),
            "Invalid client configuration: relative URL without a base"
        );
        assert_eq!(error.http_status(), None);
    }
}

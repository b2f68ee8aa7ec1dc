//! Transport abstraction between the API client and the network
//!
//! The client only speaks in [`ApiRequest`]/[`ApiResponse`] values, so tests
//! can substitute [`crate::mock::MockTransport`] for the reqwest-backed
//! [`ReqwestTransport`].

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use scamshield_core::ApiConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// HTTP method used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A request relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path starting with `/`, query string included
    pub path: String,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// GET request for `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    /// POST request for `path` with a JSON body
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A raw response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl ApiResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failure to obtain any response
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP client reported an error (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend could not be reached
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Sends API requests
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send one request and return whatever response arrived
    ///
    /// Non-success statuses are responses, not errors.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Transport backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ReqwestTransport {
    /// Build a transport from API configuration
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the resolved base URL is not
    /// a valid absolute URL or the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = config.resolved_base_url();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::configuration(format!("invalid base URL '{base_url}': {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Absolute base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, %url, "Sending API request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        builder = builder.header(reqwest::header::ACCEPT, "application/json");

        if let Some(ref api_key) = self.api_key {
            builder = builder.header("X-API-Key", api_key);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(%url, status, "Received API response");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_response_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(199, "").is_success());
        assert!(!ApiResponse::new(301, "").is_success());
        assert!(!ApiResponse::new(500, "").is_success());
    }

    #[test]
    fn test_request_builders() {
        let get = ApiRequest::get("/employees");
        assert_eq!(get.method, Method::Get);
        assert!(get.body.is_none());

        let post = ApiRequest::post("/simulate-call", serde_json::json!({"employee_id": 1}));
        assert_eq!(post.method, Method::Post);
        assert_eq!(post.body, Some(serde_json::json!({"employee_id": 1})));
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn test_reqwest_transport_resolves_relative_base() {
        let transport = ReqwestTransport::new(&ApiConfig::default()).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_reqwest_transport_rejects_bad_origin() {
        let config = ApiConfig {
            origin: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let error = ReqwestTransport::new(&config).unwrap_err();
        assert!(matches!(error, ClientError::Configuration { .. }));
    }
}

//! API client value shared by the directory and call simulation operations

use crate::error::{ClientError, ClientResult};
use crate::response;
use crate::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
use scamshield_core::ApiConfig;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error};

/// API client for the training backend
///
/// Stateless apart from its transport; clone freely. No responses are cached.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client that talks HTTP to the configured backend
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the base URL is invalid.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(config)?)))
    }

    /// Create a client over an arbitrary transport
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a request, mapping transport failures to a fetch error
    pub(crate) async fn send_read(&self, path: &str, failure: &str) -> ClientResult<ApiResponse> {
        debug!(path, "Fetching");
        self.transport
            .send(ApiRequest::get(path))
            .await
            .map_err(|e| {
                error!(path, error = %e, "{failure}");
                ClientError::fetch(failure, e)
            })
    }

    /// GET `path` and decode the body, failing with `failure` on any error
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        failure: &str,
    ) -> ClientResult<T> {
        let response = self.send_read(path, failure).await?;

        if !response.is_success() {
            let cause = response::status_error(&response);
            error!(path, status = cause.status, detail = ?cause.detail, "{failure}");
            return Err(ClientError::fetch(failure, cause));
        }

        response::decode(&response).map_err(|e| {
            error!(path, error = %e, "{failure}: undecodable body");
            ClientError::fetch(failure, e)
        })
    }

    /// Send a POST request
    pub(crate) async fn send_write(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse, crate::transport::TransportError> {
        debug!(path = %request.path, "Posting");
        self.transport.send(request).await
    }
}

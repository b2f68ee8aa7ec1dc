//! Scripted transport for testing

use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with a status and body, optionally after a delay
    Respond {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
        /// Delay before the response is returned
        delay: Option<Duration>,
    },
    /// Fail as if the backend were unreachable
    Unreachable(String),
}

impl MockReply {
    /// JSON response
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        Self::Respond {
            status,
            body: serde_json::to_string(value).unwrap_or_default(),
            delay: None,
        }
    }

    /// Raw text response
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            body: body.into(),
            delay: None,
        }
    }

    /// Delay this reply
    #[must_use]
    pub fn delayed(self, by: Duration) -> Self {
        match self {
            Self::Respond { status, body, .. } => Self::Respond {
                status,
                body,
                delay: Some(by),
            },
            other @ Self::Unreachable(_) => other,
        }
    }
}

/// Mock transport with per-route reply queues
///
/// Replies for a route are consumed in order; the last one repeats. Unrouted
/// requests get a 404 with an `error` body. Every request is recorded.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<MockReply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Create an empty mock
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method path`
    pub fn on(&self, method: Method, path: impl Into<String>, reply: MockReply) -> &Self {
        self.routes
            .lock()
            .entry((method, path.into()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a JSON reply for `GET path`
    pub fn on_get<T: Serialize>(&self, path: impl Into<String>, status: u16, value: &T) -> &Self {
        self.on(Method::Get, path, MockReply::json(status, value))
    }

    /// Queue a JSON reply for `POST path`
    pub fn on_post<T: Serialize>(&self, path: impl Into<String>, status: u16, value: &T) -> &Self {
        self.on(Method::Post, path, MockReply::json(status, value))
    }

    /// All requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received for `method path`
    #[must_use]
    pub fn request_count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<MockReply> {
        let mut routes = self.routes.lock();
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = self.next_reply(request.method, &request.path);
        let method = request.method;
        let path = request.path.clone();
        self.requests.lock().push(request);

        match reply {
            Some(MockReply::Respond {
                status,
                body,
                delay,
            }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(ApiResponse { status, body })
            }
            Some(MockReply::Unreachable(message)) => Err(TransportError::Connection(message)),
            None => Ok(ApiResponse::new(
                404,
                serde_json::json!({ "error": format!("no mock route for {method} {path}") })
                    .to_string(),
            )),
        }
    }
}

//! Call simulation operations

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::response;
use crate::transport::ApiRequest;
use scamshield_core::types::{CallSimulationRequest, CallSimulationResponse, CallStatus, EmployeeId};
use tracing::{error, info};

/// Message used when no response could be obtained
pub const INITIATION_FAILED: &str = "Failed to initiate call simulation";

impl ApiClient {
    /// Ask the backend to place a simulated scam call to an employee
    ///
    /// # Errors
    ///
    /// See [`ApiClient::simulate_call_with`].
    pub async fn simulate_call(
        &self,
        employee_id: EmployeeId,
        scenario_type: &str,
    ) -> ClientResult<CallSimulationResponse> {
        self.simulate_call_with(&CallSimulationRequest::new(employee_id, scenario_type))
            .await
    }

    /// Send a fully specified call simulation request
    ///
    /// The scenario type is passed through unvalidated.
    ///
    /// # Errors
    ///
    /// Returns a simulation error carrying the server's `error` message on a
    /// non-success status (or a message derived from the status code), and
    /// "Failed to initiate call simulation" when the backend is unreachable or
    /// the response cannot be decoded.
    pub async fn simulate_call_with(
        &self,
        request: &CallSimulationRequest,
    ) -> ClientResult<CallSimulationResponse> {
        let employee_id = request.employee_id;
        let body = serde_json::to_value(request)
            .map_err(|e| ClientError::simulation_caused_by(INITIATION_FAILED, None, e))?;

        let response = self
            .send_write(ApiRequest::post("/simulate-call", body))
            .await
            .map_err(|e| {
                error!(employee_id, error = %e, "Call simulation request failed");
                ClientError::simulation_caused_by(INITIATION_FAILED, None, e)
            })?;

        if !response.is_success() {
            let message = response::error_detail(&response.body).unwrap_or_else(|| {
                format!(
                    "Call simulation failed with HTTP status {}",
                    response.status
                )
            });
            error!(employee_id, status = response.status, %message, "Call simulation rejected");
            return Err(ClientError::simulation(message, Some(response.status)));
        }

        let simulation: CallSimulationResponse = response::decode(&response).map_err(|e| {
            error!(employee_id, error = %e, "Undecodable call simulation response");
            ClientError::simulation_caused_by(INITIATION_FAILED, Some(response.status), e)
        })?;

        info!(
            employee_id,
            call_id = %simulation.call_id,
            status = %simulation.status,
            scenario = %request.scenario_type,
            "Call simulation requested"
        );
        Ok(simulation)
    }

    /// Poll the status of a previously initiated call
    ///
    /// # Errors
    ///
    /// Returns a fetch error naming the call id.
    pub async fn get_call_status(&self, call_id: &str) -> ClientResult<CallStatus> {
        self.fetch_json(
            &format!("/call-status/{}", urlencoding::encode(call_id)),
            &format!("Failed to fetch call status {call_id}"),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::INITIATION_FAILED;
    use crate::client::ApiClient;
    use crate::mock::{MockReply, MockTransport};
    use crate::transport::Method;
    use pretty_assertions::assert_eq;
    use scamshield_core::types::CallSimulationRequest;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Arc<MockTransport>, ApiClient) {
        let mock = Arc::new(MockTransport::new());
        let client = ApiClient::with_transport(mock.clone());
        (mock, client)
    }

    #[tokio::test]
    async fn test_simulate_call_success() {
        let (mock, client) = setup();
        mock.on_post(
            "/simulate-call",
            200,
            &json!({"call_id": "abc", "status": "success", "message": "queued"}),
        );

        let response = client.simulate_call(1, "default").await.unwrap();
        assert_eq!(response.call_id, "abc");
        assert_eq!(response.status, "success");
        assert_eq!(response.message, "queued");

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].body,
            Some(json!({"employee_id": 1, "scenario_type": "default"}))
        );
    }

    #[tokio::test]
    async fn test_simulate_call_sends_phone_number_when_set() {
        let (mock, client) = setup();
        mock.on_post(
            "/simulate-call",
            200,
            &json!({"call_id": "c1", "status": "initiated", "message": "ok"}),
        );

        let request = CallSimulationRequest::new(7, "tech_support").with_phone_number("6047832553");
        client.simulate_call_with(&request).await.unwrap();

        assert_eq!(
            mock.requests()[0].body,
            Some(json!({"employee_id": 7, "scenario_type": "tech_support", "phone_number": "6047832553"}))
        );
    }

    #[tokio::test]
    async fn test_simulate_call_server_error_message() {
        let (mock, client) = setup();
        mock.on_post("/simulate-call", 500, &json!({"error": "employee not found"}));

        let error = client.simulate_call(1, "default").await.unwrap_err();
        assert!(error.is_simulation());
        assert_eq!(error.to_string(), "employee not found");
        assert_eq!(error.http_status(), Some(500));
    }

    #[tokio::test]
    async fn test_simulate_call_status_derived_message() {
        let (mock, client) = setup();
        mock.on(Method::Post, "/simulate-call", MockReply::text(502, "Bad Gateway"));

        let error = client.simulate_call(1, "default").await.unwrap_err();
        assert_eq!(error.to_string(), "Call simulation failed with HTTP status 502");
    }

    #[tokio::test]
    async fn test_simulate_call_transport_failure() {
        let (mock, client) = setup();
        mock.on(
            Method::Post,
            "/simulate-call",
            MockReply::Unreachable("connection refused".to_string()),
        );

        let error = client.simulate_call(1, "default").await.unwrap_err();
        assert!(error.is_simulation());
        assert_eq!(error.to_string(), INITIATION_FAILED);
        assert_eq!(error.http_status(), None);
    }

    #[tokio::test]
    async fn test_get_call_status() {
        let (mock, client) = setup();
        mock.on_get(
            "/call-status/call_123",
            200,
            &json!({"call_id": "call_123", "status": "completed", "details": {"confidence_score": 0.85}}),
        );

        let status = client.get_call_status("call_123").await.unwrap();
        assert_eq!(status.status, "completed");
        assert!(status.details.unwrap().contains_key("confidence_score"));

        let error = client.get_call_status("missing").await.unwrap_err();
        assert!(error.is_fetch());
        assert_eq!(error.to_string(), "Failed to fetch call status missing");
    }
}

//! Core data types shared by the `ScamShield` client and dashboard state

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Employee identifier type
pub type EmployeeId = u64;

/// Scenario sent when the caller does not choose one
pub const DEFAULT_SCENARIO: &str = "default";

/// Employee identity and contact record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct Employee {
    /// Stable identifier assigned by the backend
    pub id: EmployeeId,

    /// Display name
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    /// Phone number, possibly with formatting characters
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_number: String,

    /// Company name; `None` means unknown
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,
}

impl Employee {
    /// Create an employee record without a company
    pub fn new(id: EmployeeId, name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone_number: phone_number.into(),
            company: None,
        }
    }

    /// Attach a company name; blank names are stored as unknown
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        let company = company.into();
        self.company = if company.trim().is_empty() {
            None
        } else {
            Some(company)
        };
        self
    }

    /// Phone number reduced to its digits
    #[must_use]
    pub fn phone_digits(&self) -> String {
        crate::utils::normalize_phone_digits(&self.phone_number)
    }

    /// Phone number formatted for display
    #[must_use]
    pub fn display_phone(&self) -> String {
        crate::utils::format_phone_number(&self.phone_number)
    }
}

/// Three-step rating used for resistance and susceptibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// One historical scoring event for an employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SecurityAssessment {
    /// Assessment identifier
    pub id: i64,

    /// Assessed employee
    pub employee_id: EmployeeId,

    /// Raw timestamp as sent by the backend
    pub assessment_date: String,

    /// Score between 0 and 100
    #[validate(range(min = 0, max = 100))]
    pub security_score: i32,

    /// How well the employee resisted the simulated scam
    pub resistance_level: Level,

    /// How susceptible the employee was to social engineering
    pub social_engineering_susceptibility: Level,

    /// Free-text feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    /// Explanation of how the score was derived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_explanation: Option<String>,
}

impl SecurityAssessment {
    /// Parsed assessment timestamp, if the backend sent a recognizable format
    #[must_use]
    pub fn assessed_at(&self) -> Option<NaiveDateTime> {
        crate::utils::parse_assessment_date(&self.assessment_date)
    }

    /// Score band used to colour the score
    #[must_use]
    pub const fn score_band(&self) -> crate::utils::ScoreBand {
        crate::utils::ScoreBand::from_score(self.security_score)
    }

    /// Feedback text, or the placeholder shown when none was recorded
    #[must_use]
    pub fn feedback_or_default(&self) -> &str {
        self.feedback
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or("No feedback provided")
    }
}

/// Sort assessments newest first; unparseable dates sort last
pub fn sort_newest_first(assessments: &mut [SecurityAssessment]) {
    assessments.sort_by(|a, b| match (a.assessed_at(), b.assessed_at()) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| b.id.cmp(&a.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.id.cmp(&a.id),
    });
}

/// Request body for the simulate-call endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSimulationRequest {
    /// Employee to call
    pub employee_id: EmployeeId,

    /// Opaque scenario name understood by the backend
    pub scenario_type: String,

    /// Number to dial; the backend requires it to place the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl CallSimulationRequest {
    /// Create a request for the given employee and scenario
    pub fn new(employee_id: EmployeeId, scenario_type: impl Into<String>) -> Self {
        Self {
            employee_id,
            scenario_type: scenario_type.into(),
            phone_number: None,
        }
    }

    /// Attach the phone number to dial
    #[must_use]
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

/// Response body of the simulate-call endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSimulationResponse {
    /// Server-assigned call identifier
    pub call_id: String,

    /// Status of the call initiation
    pub status: String,

    /// Human-readable message
    pub message: String,

    /// Name of the employee being called
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,

    /// Phone number being called
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_phone: Option<String>,
}

impl CallSimulationResponse {
    /// Whether `status` is one of the accepted success sentinels
    #[must_use]
    pub fn is_success<S: AsRef<str>>(&self, success_statuses: &[S]) -> bool {
        success_statuses
            .iter()
            .any(|s| s.as_ref().eq_ignore_ascii_case(&self.status))
    }
}

/// Status of a previously initiated call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallStatus {
    /// Call identifier, when echoed by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,

    /// Current status
    pub status: String,

    /// Additional backend-specific details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,

    /// Call duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    /// Call transcript if available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

/// Body of the employee count endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCount {
    /// Number of employees in the directory
    pub count: u64,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn assessment(id: i64, date: &str) -> SecurityAssessment {
        SecurityAssessment {
            id,
            employee_id: 1,
            assessment_date: date.to_string(),
            security_score: 75,
            resistance_level: Level::Medium,
            social_engineering_susceptibility: Level::Low,
            feedback: None,
            scoring_explanation: None,
        }
    }

    #[test]
    fn test_employee_deserialization() {
        let employee: Employee = serde_json::from_value(json!({
            "id": 1,
            "name": "Alice",
            "phone_number": "5551234567",
            "company": "Acme"
        }))
        .unwrap();

        assert_eq!(
            employee,
            Employee::new(1, "Alice", "5551234567").with_company("Acme")
        );
    }

    #[test]
    fn test_employee_company_absent_or_blank_is_unknown() {
        let missing: Employee =
            serde_json::from_value(json!({"id": 2, "name": "Bob", "phone_number": "1"})).unwrap();
        let blank: Employee = serde_json::from_value(
            json!({"id": 2, "name": "Bob", "phone_number": "1", "company": "  "}),
        )
        .unwrap();
        let null: Employee = serde_json::from_value(
            json!({"id": 2, "name": "Bob", "phone_number": "1", "company": null}),
        )
        .unwrap();

        assert!(missing.company.is_none());
        assert!(blank.company.is_none());
        assert!(null.company.is_none());
        assert!(Employee::new(2, "Bob", "1").with_company("").company.is_none());
    }

    #[test]
    fn test_employee_null_phone_becomes_empty() {
        let employee: Employee =
            serde_json::from_value(json!({"id": 3, "name": "Carol", "phone_number": null}))
                .unwrap();
        assert_eq!(employee.phone_number, "");
    }

    #[test]
    fn test_employee_serialization_omits_unknown_company() {
        let value = serde_json::to_value(Employee::new(1, "Alice", "555")).unwrap();
        assert_eq!(value, json!({"id": 1, "name": "Alice", "phone_number": "555"}));
    }

    #[test]
    fn test_employee_validation() {
        assert!(Employee::new(1, "Alice", "555").validate().is_ok());
        assert!(Employee::new(1, "", "555").validate().is_err());
    }

    #[test]
    fn test_assessment_deserialization_and_levels() {
        let value = json!({
            "id": 123,
            "employee_id": 1,
            "assessment_date": "2025-10-05 14:30:00",
            "security_score": 75,
            "resistance_level": "Medium",
            "social_engineering_susceptibility": "Low",
            "feedback": "Good awareness"
        });
        let parsed: SecurityAssessment = serde_json::from_value(value).unwrap();

        assert_eq!(parsed.resistance_level, Level::Medium);
        assert_eq!(parsed.social_engineering_susceptibility, Level::Low);
        assert_eq!(parsed.feedback_or_default(), "Good awareness");
        assert!(parsed.scoring_explanation.is_none());
        assert!(parsed.assessed_at().is_some());
    }

    #[test]
    fn test_assessment_rejects_unknown_level() {
        let value = json!({
            "id": 1,
            "employee_id": 1,
            "assessment_date": "2025-10-05T14:30:00",
            "security_score": 10,
            "resistance_level": "Extreme",
            "social_engineering_susceptibility": "Low"
        });
        assert!(serde_json::from_value::<SecurityAssessment>(value).is_err());
    }

    #[test]
    fn test_assessment_score_validation() {
        let mut a = assessment(1, "2025-01-01T00:00:00");
        assert!(a.validate().is_ok());
        a.security_score = 101;
        assert!(a.validate().is_err());
        a.security_score = -1;
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_feedback_placeholder() {
        let mut a = assessment(1, "2025-01-01T00:00:00");
        assert_eq!(a.feedback_or_default(), "No feedback provided");
        a.feedback = Some(String::new());
        assert_eq!(a.feedback_or_default(), "No feedback provided");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut list = vec![
            assessment(1, "2025-01-01T09:00:00"),
            assessment(2, "not a date"),
            assessment(3, "2025-03-01 09:00:00"),
            assessment(4, "2025-02-01T09:00:00Z"),
        ];
        sort_newest_first(&mut list);

        let ids: Vec<i64> = list.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_call_request_serialization() {
        let request = CallSimulationRequest::new(1, DEFAULT_SCENARIO);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"employee_id": 1, "scenario_type": "default"})
        );

        let request = request.with_phone_number("+15551234567");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"employee_id": 1, "scenario_type": "default", "phone_number": "+15551234567"})
        );
    }

    #[test]
    fn test_call_response_success_sentinels() {
        let response: CallSimulationResponse = serde_json::from_value(
            json!({"call_id": "abc", "status": "success", "message": "queued"}),
        )
        .unwrap();

        assert!(response.is_success(&["success", "initiated"]));
        assert!(!response.is_success(&["initiated"]));
        assert!(response.employee_name.is_none());
    }

    #[test]
    fn test_call_status_details_are_structured() {
        let status: CallStatus = serde_json::from_value(json!({
            "call_id": "call_1",
            "status": "completed",
            "details": {"confidence_score": 0.85},
            "duration": 120
        }))
        .unwrap();

        let details = status.details.unwrap();
        assert_eq!(details.get("confidence_score"), Some(&json!(0.85)));
        assert_eq!(status.duration, Some(120));
        assert!(status.transcript.is_none());
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Low.to_string(), "Low");
        assert_eq!(Level::Medium.to_string(), "Medium");
        assert_eq!(Level::High.to_string(), "High");
    }
}

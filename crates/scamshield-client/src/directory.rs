//! Employee directory operations

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use scamshield_core::types::{Employee, EmployeeCount, EmployeeId, SecurityAssessment};
use tracing::{error, info, warn};
use validator::Validate;

/// Drop records that break the field rules, logging each one
fn retain_valid<T: Validate>(records: Vec<T>, kind: &'static str) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| match record.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(kind, error = %e, "Skipping invalid record from backend");
                false
            }
        })
        .collect()
}

impl ApiClient {
    /// Fetch the full employee roster
    ///
    /// Records with an empty or overlong name are dropped.
    ///
    /// # Errors
    ///
    /// Returns a fetch error "Failed to fetch employees" on a non-success
    /// response, an undecodable body or a transport failure.
    pub async fn fetch_all_employees(&self) -> ClientResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .fetch_json("/employees", "Failed to fetch employees")
            .await?;
        let employees = retain_valid(employees, "employee");
        info!(count = employees.len(), "Fetched employee roster");
        Ok(employees)
    }

    /// Fetch a single employee
    ///
    /// # Errors
    ///
    /// Returns a fetch error naming the employee id, including when the
    /// backend does not know the id.
    pub async fn fetch_employee(&self, id: EmployeeId) -> ClientResult<Employee> {
        let failure = format!("Failed to fetch employee {id}");
        let employee: Employee = self
            .fetch_json(&format!("/employees/{id}"), &failure)
            .await?;
        employee.validate().map_err(|e| {
            error!(employee_id = id, error = %e, "{failure}: invalid record");
            ClientError::fetch(failure.as_str(), e)
        })?;
        Ok(employee)
    }

    /// Fetch every security assessment recorded for an employee
    ///
    /// An empty list is a valid answer. Order is whatever the server sent.
    /// Assessments with a score outside 0 to 100 are dropped.
    ///
    /// # Errors
    ///
    /// Returns a fetch error naming the employee id.
    pub async fn fetch_security_assessments(
        &self,
        employee_id: EmployeeId,
    ) -> ClientResult<Vec<SecurityAssessment>> {
        let assessments: Vec<SecurityAssessment> = self
            .fetch_json(
                &format!("/employees/{employee_id}/security-assessments"),
                &format!("Failed to fetch security assessments for employee {employee_id}"),
            )
            .await?;
        let assessments = retain_valid(assessments, "security assessment");
        info!(
            employee_id,
            count = assessments.len(),
            "Fetched security assessments"
        );
        Ok(assessments)
    }

    /// Search employees on the server by name or phone
    ///
    /// A blank term fetches the whole roster.
    ///
    /// # Errors
    ///
    /// Returns a fetch error "Failed to search employees".
    pub async fn search_employees(&self, term: &str) -> ClientResult<Vec<Employee>> {
        let term = term.trim();
        if term.is_empty() {
            return self.fetch_all_employees().await;
        }
        let found: Vec<Employee> = self
            .fetch_json(
                &format!("/employees?search={}", urlencoding::encode(term)),
                "Failed to search employees",
            )
            .await?;
        Ok(retain_valid(found, "employee"))
    }

    /// Number of employees in the directory
    ///
    /// # Errors
    ///
    /// Returns a fetch error "Failed to fetch employee count".
    pub async fn employee_count(&self) -> ClientResult<u64> {
        let body: EmployeeCount = self
            .fetch_json("/employees/count", "Failed to fetch employee count")
            .await?;
        Ok(body.count)
    }
}

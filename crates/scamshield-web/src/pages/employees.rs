//! Employee Security Assessments page

use crate::components::{LoadState, Roster};
use crate::notification::{Notification, Notifier};
use parking_lot::Mutex;
use scamshield_client::ApiClient;
use scamshield_core::types::sort_newest_first;
use scamshield_core::utils::{ScoreBand, format_assessment_date};
use scamshield_core::{Config, Employee, EmployeeId, Level, SecurityAssessment};
use tracing::{error, info, warn};

/// Result of an assessment fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentsOutcome {
    /// Assessments stored for the selection
    Loaded(usize),
    /// Fetch failed; the message was recorded and published
    Failed(String),
    /// The selection changed while the fetch was pending; result dropped
    Stale,
}

/// One assessment formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentRow {
    /// Assessment date, `YYYY-MM-DD HH:MM:SS` when parseable
    pub date: String,
    /// Score out of 100
    pub score: i32,
    /// Colour band for the score
    pub band: ScoreBand,
    /// Resistance to the scam
    pub resistance: Level,
    /// Susceptibility to social engineering
    pub susceptibility: Level,
    /// Feedback or placeholder
    pub feedback: String,
    /// Scoring explanation, if recorded
    pub explanation: Option<String>,
}

impl From<&SecurityAssessment> for AssessmentRow {
    fn from(assessment: &SecurityAssessment) -> Self {
        Self {
            date: format_assessment_date(&assessment.assessment_date),
            score: assessment.security_score,
            band: assessment.score_band(),
            resistance: assessment.resistance_level,
            susceptibility: assessment.social_engineering_susceptibility,
            feedback: assessment.feedback_or_default().to_string(),
            explanation: assessment.scoring_explanation.clone(),
        }
    }
}

#[derive(Debug)]
struct PageState {
    roster: Roster,
    query: String,
    selection: Option<Employee>,
    selection_version: u64,
    assessments: Vec<SecurityAssessment>,
    assessments_loading: bool,
    error: Option<String>,
}

impl PageState {
    fn reset_selection(&mut self, selection: Option<Employee>) -> u64 {
        self.selection_version += 1;
        self.assessments_loading = selection.is_some();
        self.selection = selection;
        self.assessments.clear();
        self.error = None;
        self.selection_version
    }
}

/// State behind the Employee Security Assessments page
///
/// Selecting an employee fetches their assessments. Each fetch is tagged with
/// the selection version it was issued for and its result is dropped if the
/// selection has changed since.
#[derive(Debug)]
pub struct EmployeesPage {
    client: ApiClient,
    notifier: Notifier,
    state: Mutex<PageState>,
}

impl EmployeesPage {
    /// Create the page in the idle state
    #[must_use]
    pub fn new(client: ApiClient, notifier: Notifier, config: &Config) -> Self {
        Self {
            client,
            notifier,
            state: Mutex::new(PageState {
                roster: Roster::new(config.search.dropdown_limit),
                query: String::new(),
                selection: None,
                selection_version: 0,
                assessments: Vec::new(),
                assessments_loading: false,
                error: None,
            }),
        }
    }

    /// Initial roster load
    ///
    /// Does nothing if a load already started; use [`Self::refetch`] to retry.
    pub async fn mount(&self) -> LoadState {
        let idle = *self.state.lock().roster.state() == LoadState::Idle;
        if !idle {
            return self.load_state();
        }
        self.refetch().await
    }

    /// Fetch the roster again
    ///
    /// A selected employee missing from the new roster is deselected along
    /// with their assessments.
    pub async fn refetch(&self) -> LoadState {
        let ticket = self.state.lock().roster.begin_load();
        let result = self.client.fetch_all_employees().await;

        let mut state = self.state.lock();
        state.roster.finish_load(ticket, result);
        if let Some(id) = state.selection.as_ref().map(|e| e.id)
            && state.roster.find(id).is_none()
        {
            info!(employee_id = id, "Selected employee left the roster");
            state.reset_selection(None);
        }
        state.roster.state().clone()
    }

    /// Roster load state
    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.state.lock().roster.state().clone()
    }

    /// Set the dropdown search text
    pub fn set_query(&self, query: impl Into<String>) {
        self.state.lock().query = query.into();
    }

    /// Dropdown suggestions for the current query
    #[must_use]
    pub fn dropdown(&self) -> Vec<Employee> {
        let mut state = self.state.lock();
        let query = state.query.clone();
        state.roster.dropdown(&query)
    }

    /// Select a roster employee and fetch their assessments
    ///
    /// Returns `None` if the employee is not in the loaded roster.
    pub async fn select(&self, employee: &Employee) -> Option<AssessmentsOutcome> {
        self.select_by_id(employee.id).await
    }

    /// Select a roster employee by id and fetch their assessments
    ///
    /// Returns `None` if the id is not loaded.
    pub async fn select_by_id(&self, id: EmployeeId) -> Option<AssessmentsOutcome> {
        let employee = self.state.lock().roster.find(id).cloned();
        match employee {
            Some(employee) => Some(self.load_assessments(employee).await),
            None => {
                warn!(employee_id = id, "Cannot select unknown employee");
                None
            }
        }
    }

    async fn load_assessments(&self, employee: Employee) -> AssessmentsOutcome {
        let version = self.state.lock().reset_selection(Some(employee.clone()));
        info!(employee_id = employee.id, version, "Fetching security assessments");

        let result = self.client.fetch_security_assessments(employee.id).await;

        let mut state = self.state.lock();
        if state.selection_version != version {
            warn!(
                employee_id = employee.id,
                version,
                current = state.selection_version,
                "Discarding stale security assessments"
            );
            return AssessmentsOutcome::Stale;
        }
        state.assessments_loading = false;

        match result {
            Ok(mut assessments) => {
                sort_newest_first(&mut assessments);
                let count = assessments.len();
                state.assessments = assessments;
                AssessmentsOutcome::Loaded(count)
            }
            Err(e) => {
                let message = format!("Failed to fetch security assessments for {}", employee.name);
                error!(employee_id = employee.id, error = %e, "{message}");
                state.error = Some(message.clone());
                drop(state);
                self.notifier.publish(Notification::failure(message.clone()));
                AssessmentsOutcome::Failed(message)
            }
        }
    }

    /// Drop the selection; a pending fetch becomes stale
    pub fn clear_selection(&self) {
        self.state.lock().reset_selection(None);
    }

    /// Selected employee
    #[must_use]
    pub fn selection(&self) -> Option<Employee> {
        self.state.lock().selection.clone()
    }

    /// Loaded employees
    #[must_use]
    pub fn employees(&self) -> Vec<Employee> {
        self.state.lock().roster.employees().to_vec()
    }

    /// Assessments of the selected employee, newest first
    #[must_use]
    pub fn assessments(&self) -> Vec<SecurityAssessment> {
        self.state.lock().assessments.clone()
    }

    /// Assessments formatted for display
    #[must_use]
    pub fn assessment_rows(&self) -> Vec<AssessmentRow> {
        self.state
            .lock()
            .assessments
            .iter()
            .map(AssessmentRow::from)
            .collect()
    }

    /// Whether an assessment fetch is pending
    #[must_use]
    pub fn is_loading_assessments(&self) -> bool {
        self.state.lock().assessments_loading
    }

    /// Error from the last assessment fetch
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }
}

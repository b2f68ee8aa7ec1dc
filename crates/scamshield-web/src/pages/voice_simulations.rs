//! Voice Simulations page
//!
//! Loads the roster, offers a search dropdown, and sends a simulated scam call
//! to the selected employee. At most one call request is outstanding per page,
//! whichever employee it targets.

use crate::components::{Debouncer, LoadState, Roster};
use crate::notification::{Notification, Notifier};
use parking_lot::Mutex;
use scamshield_client::ApiClient;
use scamshield_core::{CallSimulationRequest, Config, Employee, EmployeeId};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Why a call trigger was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The roster is not loaded
    NotReady,
    /// No employee is selected
    NoSelection,
    /// Another call request is still outstanding
    CallInFlight,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "employee roster is not loaded"),
            Self::NoSelection => write!(f, "no employee selected"),
            Self::CallInFlight => write!(f, "a call simulation is already in progress"),
        }
    }
}

/// Result of a call trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Refused before any request was sent
    Rejected(RejectReason),
    /// The request resolved; the notification was published
    Completed(Notification),
}

impl CallOutcome {
    /// Published notification, if the call went out
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Completed(notification) => Some(notification),
            Self::Rejected(_) => None,
        }
    }
}

/// Point-in-time view of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSimulationsSnapshot {
    /// Roster load state
    pub load_state: LoadState,
    /// Number of loaded employees
    pub employee_count: usize,
    /// Current search text
    pub query: String,
    /// Selected employee
    pub selection: Option<Employee>,
    /// Scenario sent with the next call
    pub scenario: String,
    /// Whether a call request is outstanding
    pub call_in_flight: bool,
}

#[derive(Debug)]
struct PageState {
    roster: Roster,
    query: String,
    selection: Option<Employee>,
    scenario: String,
}

/// Clears the in-flight flag when dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// State machine behind the Voice Simulations page
#[derive(Debug)]
pub struct VoiceSimulationsPage {
    client: ApiClient,
    notifier: Notifier,
    success_statuses: Vec<String>,
    debouncer: Debouncer,
    state: Mutex<PageState>,
    call_in_flight: AtomicBool,
}

impl VoiceSimulationsPage {
    /// Create the page in the idle state
    #[must_use]
    pub fn new(client: ApiClient, notifier: Notifier, config: &Config) -> Self {
        Self {
            client,
            notifier,
            success_statuses: config.calls.success_statuses.clone(),
            debouncer: Debouncer::from_millis(config.search.debounce_ms),
            state: Mutex::new(PageState {
                roster: Roster::new(config.search.dropdown_limit),
                query: String::new(),
                selection: None,
                scenario: config.calls.default_scenario.clone(),
            }),
            call_in_flight: AtomicBool::new(false),
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
    pub async fn refetch(&self) -> LoadState {
        let ticket = self.state.lock().roster.begin_load();
        let result = self.client.fetch_all_employees().await;

        let mut state = self.state.lock();
        state.roster.finish_load(ticket, result);
        if let Some(id) = state.selection.as_ref().map(|e| e.id) {
            if state.roster.find(id).is_none() {
                info!(employee_id = id, "Selected employee left the roster");
                state.selection = None;
            }
        }
        state.roster.state().clone()
    }

    /// Roster load state
    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.state.lock().roster.state().clone()
    }

    /// Loaded employees
    #[must_use]
    pub fn employees(&self) -> Vec<Employee> {
        self.state.lock().roster.employees().to_vec()
    }

    /// Set the search text
    pub fn set_query(&self, query: impl Into<String>) {
        self.state.lock().query = query.into();
    }

    /// Set the search text after the configured quiet period
    ///
    /// Returns `false` if a newer input superseded this one.
    pub async fn set_query_debounced(&self, query: impl Into<String> + Send) -> bool {
        match self.debouncer.settle(query.into()).await {
            Some(query) => {
                self.set_query(query);
                true
            }
            None => false,
        }
    }

    /// Current search text
    #[must_use]
    pub fn query(&self) -> String {
        self.state.lock().query.clone()
    }

    /// Employees matching the current query
    #[must_use]
    pub fn filtered(&self) -> Vec<Employee> {
        let mut state = self.state.lock();
        let query = state.query.clone();
        state.roster.filter(&query)
    }

    /// Dropdown suggestions for the current query
    #[must_use]
    pub fn dropdown(&self) -> Vec<Employee> {
        let mut state = self.state.lock();
        let query = state.query.clone();
        state.roster.dropdown(&query)
    }

    /// Select an employee from the loaded roster; sends nothing
    ///
    /// Returns `false` and leaves the selection alone if the employee is not
    /// in the roster.
    pub fn select(&self, employee: &Employee) -> bool {
        self.select_by_id(employee.id)
    }

    /// Select a roster employee by id
    ///
    /// Returns `false` and leaves the selection alone if the id is not loaded.
    pub fn select_by_id(&self, id: EmployeeId) -> bool {
        let mut state = self.state.lock();
        let Some(employee) = state.roster.find(id).cloned() else {
            warn!(employee_id = id, "Cannot select unknown employee");
            return false;
        };
        info!(employee_id = id, name = %employee.name, "Employee selected");
        state.selection = Some(employee);
        true
    }

    /// Drop the selection
    pub fn clear_selection(&self) {
        self.state.lock().selection = None;
    }

    /// Selected employee
    #[must_use]
    pub fn selection(&self) -> Option<Employee> {
        self.state.lock().selection.clone()
    }

    /// Choose the scenario sent with the next call
    pub fn set_scenario(&self, scenario: impl Into<String>) {
        self.state.lock().scenario = scenario.into();
    }

    /// Scenario sent with the next call
    #[must_use]
    pub fn scenario(&self) -> String {
        self.state.lock().scenario.clone()
    }

    /// Whether a call request is outstanding
    #[must_use]
    pub fn is_call_in_flight(&self) -> bool {
        self.call_in_flight.load(Ordering::Acquire)
    }

    /// Whether the call action is currently enabled
    #[must_use]
    pub fn can_trigger_call(&self) -> bool {
        let state = self.state.lock();
        !self.is_call_in_flight() && state.roster.state().is_ready() && state.selection.is_some()
    }

    /// Send a simulated call to the selected employee
    ///
    /// Refused without a request unless the roster is loaded, an employee is
    /// selected and no other call is outstanding. Otherwise the outcome is published as a notification and
    /// returned.
    pub async fn trigger_call(&self) -> CallOutcome {
        let (employee, scenario) = {
            let state = self.state.lock();
            if !state.roster.state().is_ready() {
                warn!(load_state = %state.roster.state(), "Call triggered before the roster loaded");
                return CallOutcome::Rejected(RejectReason::NotReady);
            }
            let Some(employee) = state.selection.clone() else {
                warn!("Call triggered without a selection");
                return CallOutcome::Rejected(RejectReason::NoSelection);
            };
            (employee, state.scenario.clone())
        };

        let Some(_guard) = InFlightGuard::acquire(&self.call_in_flight) else {
            warn!(employee_id = employee.id, "Call already in flight, trigger rejected");
            return CallOutcome::Rejected(RejectReason::CallInFlight);
        };

        let mut request = CallSimulationRequest::new(employee.id, scenario);
        if !employee.phone_number.is_empty() {
            request = request.with_phone_number(employee.phone_number.clone());
        }

        let notification = match self.client.simulate_call_with(&request).await {
            Ok(response) if response.is_success(self.success_statuses.as_slice()) => {
                info!(
                    employee_id = employee.id,
                    call_id = %response.call_id,
                    "Call simulation started"
                );
                Notification::success(format!(
                    "Call simulation started for {} (employee {}): {}",
                    employee.name, employee.id, response.message
                ))
            }
            Ok(response) => {
                warn!(
                    employee_id = employee.id,
                    status = %response.status,
                    "Call simulation not started"
                );
                Notification::failure(format!(
                    "Call simulation failed for {} (employee {}): status {}: {}",
                    employee.name, employee.id, response.status, response.message
                ))
            }
            Err(e) => Notification::failure(format!(
                "Call simulation failed for {} (employee {}): {e}",
                employee.name, employee.id
            )),
        };

        self.notifier.publish(notification.clone());
        CallOutcome::Completed(notification)
    }

    /// Current page state
    #[must_use]
    pub fn snapshot(&self) -> VoiceSimulationsSnapshot {
        let state = self.state.lock();
        VoiceSimulationsSnapshot {
            load_state: state.roster.state().clone(),
            employee_count: state.roster.employees().len(),
            query: state.query.clone(),
            selection: state.selection.clone(),
            scenario: state.scenario.clone(),
            call_in_flight: self.is_call_in_flight(),
        }
    }
}

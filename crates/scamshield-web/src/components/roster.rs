//! Roster loading shared by the pages

use scamshield_client::ClientResult;
use scamshield_core::{Employee, EmployeeId, EmployeeSearch};
use std::fmt;
use tracing::{error, info, warn};

/// Roster load lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetch in progress
    Loading,
    /// Roster available
    Ready,
    /// Fetch failed; the message is kept for display
    LoadError(String),
}

impl LoadState {
    /// Whether a fetch is in progress
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the roster is available
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Error message of a failed load
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::LoadError(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::LoadError(message) => write!(f, "load error: {message}"),
        }
    }
}

/// Ticket identifying one roster fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Roster snapshot plus its load state
///
/// Holds no lock and performs no I/O. A page starts a load with
/// [`Roster::begin_load`], awaits the fetch without holding its lock and hands
/// the result to [`Roster::finish_load`]. Results of superseded loads are
/// ignored.
#[derive(Debug, Clone)]
pub struct Roster {
    state: LoadState,
    search: EmployeeSearch,
    generation: u64,
}

impl Roster {
    /// Empty roster in the idle state
    #[must_use]
    pub const fn new(dropdown_limit: usize) -> Self {
        Self {
            state: LoadState::Idle,
            search: EmployeeSearch::new(Vec::new(), dropdown_limit),
            generation: 0,
        }
    }

    /// Enter the loading state
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a fetch result
    ///
    /// Returns `false` if a newer load has started since `ticket` was issued.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ClientResult<Vec<Employee>>) -> bool {
        if ticket.0 != self.generation {
            warn!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding superseded roster load"
            );
            return false;
        }

        match result {
            Ok(employees) => {
                info!(count = employees.len(), "Roster ready");
                self.search.replace_roster(employees);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                error!(error = %e, "Roster load failed");
                self.search.replace_roster(Vec::new());
                self.state = LoadState::LoadError(e.to_string());
            }
        }
        true
    }

    /// Current load state
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// Loaded employees, empty unless ready
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        self.search.roster()
    }

    /// Look up an employee by id
    #[must_use]
    pub fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees().iter().find(|e| e.id == id)
    }

    /// Employees matching `query`, in roster order
    pub fn filter(&mut self, query: &str) -> Vec<Employee> {
        self.search.filter(query).into_iter().cloned().collect()
    }

    /// Dropdown suggestions for `query`
    pub fn dropdown(&mut self, query: &str) -> Vec<Employee> {
        self.search.dropdown(query).into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scamshield_client::ClientError;

    fn alice() -> Employee {
        Employee::new(1, "Alice", "5551234567").with_company("Acme")
    }

    #[test]
    fn test_successful_load() {
        let mut roster = Roster::new(5);
        assert_eq!(roster.state(), &LoadState::Idle);

        let ticket = roster.begin_load();
        assert!(roster.state().is_loading());

        assert!(roster.finish_load(ticket, Ok(vec![alice()])));
        assert!(roster.state().is_ready());
        assert_eq!(roster.find(1), Some(&alice()));
        assert_eq!(roster.filter("alice"), vec![alice()]);
        assert!(roster.filter("999").is_empty());
        assert_eq!(roster.dropdown("acme"), vec![alice()]);
    }

    #[test]
    fn test_failed_load_empties_roster() {
        let mut roster = Roster::new(5);
        let ticket = roster.begin_load();
        roster.finish_load(ticket, Ok(vec![alice()]));

        let ticket = roster.begin_load();
        let failure = ClientError::fetch("Failed to fetch employees", "connection refused");
        roster.finish_load(ticket, Err(failure));

        assert_eq!(roster.state().error(), Some("Failed to fetch employees"));
        assert!(roster.employees().is_empty());
        assert!(roster.filter("").is_empty());
    }

    #[test]
    fn test_superseded_load_is_ignored() {
        let mut roster = Roster::new(5);
        let stale = roster.begin_load();
        let current = roster.begin_load();

        assert!(roster.finish_load(current, Ok(vec![alice()])));
        assert!(!roster.finish_load(stale, Ok(Vec::new())));
        assert_eq!(roster.employees().len(), 1);
    }

    #[test]
    fn test_load_state_display() {
        assert_eq!(LoadState::Ready.to_string(), "ready");
        assert_eq!(
            LoadState::LoadError("Failed to fetch employees".into()).to_string(),
            "load error: Failed to fetch employees"
        );
    }
}

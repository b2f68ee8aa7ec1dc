//! Employee search and autocomplete filtering
//!
//! Filtering is a pure function of the roster and the query. Name and company
//! match case-insensitively; phone numbers match as an exact substring of
//! either the raw number or its digits. An empty or whitespace-only query
//! returns the whole roster.

use crate::types::Employee;

/// Default number of suggestions shown in the dropdown
pub const DEFAULT_DROPDOWN_LIMIT: usize = 5;

/// Whether `employee` matches an already-trimmed, non-empty query
#[must_use]
pub fn matches(employee: &Employee, query: &str) -> bool {
    let folded = query.to_lowercase();
    employee.name.to_lowercase().contains(&folded)
        || employee
            .company
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&folded))
        || employee.phone_number.contains(query)
        || employee.phone_digits().contains(query)
}

/// Filter the roster by a free-text query, preserving roster order
#[must_use]
pub fn filter_employees<'a>(roster: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let query = query.trim();
    if query.is_empty() {
        return roster.iter().collect();
    }
    roster.iter().filter(|e| matches(e, query)).collect()
}

/// The first `limit` matches, used for autocomplete suggestions
#[must_use]
pub fn dropdown_results<'a>(roster: &'a [Employee], query: &str, limit: usize) -> Vec<&'a Employee> {
    let mut results = filter_employees(roster, query);
    results.truncate(limit);
    results
}

/// Memoized search over a roster
///
/// Holds the roster snapshot together with a version counter. Replacing the
/// roster bumps the version and drops the cached result, so a query repeated
/// against the same roster is answered without rescanning.
#[derive(Debug, Clone)]
pub struct EmployeeSearch {
    roster: Vec<Employee>,
    version: u64,
    dropdown_limit: usize,
    cache: Option<CachedQuery>,
}

#[derive(Debug, Clone)]
struct CachedQuery {
    version: u64,
    query: String,
    indices: Vec<usize>,
}

impl EmployeeSearch {
    /// Create a search over `roster`
    #[must_use]
    pub const fn new(roster: Vec<Employee>, dropdown_limit: usize) -> Self {
        Self {
            roster,
            version: 0,
            dropdown_limit,
            cache: None,
        }
    }

    /// Replace the roster wholesale
    pub fn replace_roster(&mut self, roster: Vec<Employee>) {
        self.roster = roster;
        self.version += 1;
        self.cache = None;
    }

    /// Current roster snapshot
    #[must_use]
    pub fn roster(&self) -> &[Employee] {
        &self.roster
    }

    /// Roster version, bumped on every replacement
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Maximum number of dropdown suggestions
    #[must_use]
    pub const fn dropdown_limit(&self) -> usize {
        self.dropdown_limit
    }

    /// Whether the last query is cached for the current roster
    #[must_use]
    pub fn is_cached(&self, query: &str) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|c| c.version == self.version && c.query == query.trim())
    }

    /// Filtered view for `query`
    pub fn filter(&mut self, query: &str) -> Vec<&Employee> {
        let trimmed = query.trim();
        if !self.is_cached(trimmed) {
            let indices = if trimmed.is_empty() {
                (0..self.roster.len()).collect()
            } else {
                self.roster
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| matches(e, trimmed))
                    .map(|(i, _)| i)
                    .collect()
            };
            self.cache = Some(CachedQuery {
                version: self.version,
                query: trimmed.to_string(),
                indices,
            });
        }

        self.cache.as_ref().map_or_else(Vec::new, |c| {
            c.indices
                .iter()
                .filter_map(|&i| self.roster.get(i))
                .collect()
        })
    }

    /// Dropdown suggestions for `query`
    pub fn dropdown(&mut self, query: &str) -> Vec<&Employee> {
        let limit = self.dropdown_limit;
        let mut results = self.filter(query);
        results.truncate(limit);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn roster() -> Vec<Employee> {
        vec![
            Employee::new(1, "Alice", "5551234567").with_company("Acme"),
            Employee::new(2, "Bob Stone", "(604) 783-2553").with_company("Globex"),
            Employee::new(3, "Carol", "6045550000"),
            Employee::new(4, "alan", "7775550001").with_company("ACME Labs"),
            Employee::new(5, "Dave", "7775550002"),
            Employee::new(6, "Erin", "7775550003"),
            Employee::new(7, "Frank", "7775550004"),
        ]
    }

    fn ids(list: &[&Employee]) -> Vec<u64> {
        list.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_single_record_scenario() {
        let roster = vec![Employee::new(1, "Alice", "5551234567").with_company("Acme")];

        assert_eq!(ids(&filter_employees(&roster, "alice")), vec![1]);
        assert!(filter_employees(&roster, "999").is_empty());
        assert_eq!(ids(&filter_employees(&roster, "acme")), vec![1]);
    }

    #[test]
    fn test_empty_and_whitespace_query_is_identity() {
        let roster = roster();
        assert_eq!(filter_employees(&roster, "").len(), roster.len());
        assert_eq!(filter_employees(&roster, "   \t").len(), roster.len());
    }

    #[test]
    fn test_name_and_company_are_case_insensitive() {
        let roster = roster();
        assert_eq!(ids(&filter_employees(&roster, "AL")), vec![1, 4]);
        assert_eq!(ids(&filter_employees(&roster, "acme")), vec![1, 4]);
        assert_eq!(ids(&filter_employees(&roster, "GLOBEX")), vec![2]);
    }

    #[test]
    fn test_phone_matches_raw_and_digits() {
        let roster = roster();
        assert_eq!(ids(&filter_employees(&roster, "783-2553")), vec![2]);
        assert_eq!(ids(&filter_employees(&roster, "6047832553")), vec![2]);
        assert_eq!(ids(&filter_employees(&roster, "604")), vec![2, 3]);
    }

    #[test]
    fn test_query_is_trimmed() {
        let roster = roster();
        assert_eq!(ids(&filter_employees(&roster, "  carol ")), vec![3]);
    }

    #[test]
    fn test_dropdown_truncates_in_roster_order() {
        let roster = roster();
        assert_eq!(
            ids(&dropdown_results(&roster, "777", DEFAULT_DROPDOWN_LIMIT)),
            vec![4, 5, 6, 7]
        );
        assert_eq!(
            ids(&dropdown_results(&roster, "", DEFAULT_DROPDOWN_LIMIT)),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_memoized_search_caches_and_invalidates() {
        let mut search = EmployeeSearch::new(roster(), DEFAULT_DROPDOWN_LIMIT);
        assert!(!search.is_cached("acme"));

        assert_eq!(ids(&search.filter("acme")), vec![1, 4]);
        assert!(search.is_cached("acme"));
        assert!(search.is_cached(" acme "));
        assert_eq!(ids(&search.filter("acme")), vec![1, 4]);

        search.replace_roster(vec![Employee::new(9, "Zed", "1").with_company("Acme")]);
        assert_eq!(search.version(), 1);
        assert!(!search.is_cached("acme"));
        assert_eq!(ids(&search.filter("acme")), vec![9]);
    }

    #[test]
    fn test_memoized_dropdown() {
        let mut search = EmployeeSearch::new(roster(), 2);
        assert_eq!(ids(&search.dropdown("")), vec![1, 2]);
        assert_eq!(ids(&search.dropdown("777")), vec![4, 5]);
    }

    /// Case rules spelled out independently of `matches`
    fn naive_match(employee: &Employee, raw_query: &str) -> bool {
        let query = raw_query.trim();
        let lowered_query: String = query.chars().map(|c| c.to_ascii_lowercase()).collect();
        let lowered = |s: &str| -> String { s.chars().map(|c| c.to_ascii_lowercase()).collect() };
        let digits: String = employee
            .phone_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        lowered(&employee.name).contains(&lowered_query)
            || employee
                .company
                .as_ref()
                .is_some_and(|c| lowered(c).contains(&lowered_query))
            || employee.phone_number.contains(query)
            || digits.contains(query)
    }

    fn arb_employee() -> impl Strategy<Value = Employee> {
        (
            0u64..1000,
            "[A-Za-z ]{1,12}",
            "[0-9()+ -]{0,14}",
            proptest::option::of("[A-Za-z]{1,8}"),
        )
            .prop_map(|(id, name, phone, company)| {
                let employee = Employee::new(id, name, phone);
                match company {
                    Some(c) => employee.with_company(c),
                    None => employee,
                }
            })
    }

    proptest! {
        #[test]
        fn test_empty_query_is_identity(roster in proptest::collection::vec(arb_employee(), 0..20)) {
            let filtered: Vec<Employee> = filter_employees(&roster, "").into_iter().cloned().collect();
            prop_assert_eq!(filtered, roster);
        }

        #[test]
        fn test_filter_agrees_with_case_rules(
            roster in proptest::collection::vec(arb_employee(), 0..20),
            query in " {0,2}[A-Za-z0-9()-]{1,3} {0,2}",
        ) {
            let expected: Vec<u64> = roster
                .iter()
                .filter(|e| naive_match(e, &query))
                .map(|e| e.id)
                .collect();
            prop_assert_eq!(ids(&filter_employees(&roster, &query)), expected);
        }

        #[test]
        fn test_dropdown_is_bounded_prefix(
            roster in proptest::collection::vec(arb_employee(), 0..20),
            query in "[A-Za-z0-9]{0,2}",
        ) {
            let filtered = filter_employees(&roster, &query);
            let dropdown = dropdown_results(&roster, &query, DEFAULT_DROPDOWN_LIMIT);
            prop_assert!(dropdown.len() <= DEFAULT_DROPDOWN_LIMIT);
            prop_assert_eq!(&dropdown[..], &filtered[..dropdown.len()]);
        }

        #[test]
        fn test_filter_is_deterministic(
            roster in proptest::collection::vec(arb_employee(), 0..20),
            query in ".{0,4}",
        ) {
            let mut search = EmployeeSearch::new(roster.clone(), DEFAULT_DROPDOWN_LIMIT);
            let first = ids(&filter_employees(&roster, &query));
            let second = ids(&filter_employees(&roster, &query));
            let memoized = ids(&search.filter(&query));
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&first, &memoized);
        }
    }
}

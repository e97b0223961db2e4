//! Test synthesis: turning validated case records into uniquely named,
//! independently invocable test entries.
//!
//! The dynamic-registration pattern of the original adapter is replaced by
//! an explicit value: a [`TestSuite`] owns the ordered entries and doubles
//! as the namespace that collision resolution consults. Each entry's thunk
//! returns `Result<(), CaseFailure>` instead of calling into a host
//! assertion primitive, so generation carries no dependency on any
//! particular test framework; the bridge to `cargo test` lives in
//! [`crate::harness`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::cases::TestCase;
use crate::naming::slugify;

/// Why a generated test entry failed when invoked.
///
/// Local to one entry; sibling entries are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseFailure {
    #[error("expected output {expected:?}, got {actual:?}")]
    OutputMismatch { expected: String, actual: String },

    #[error("expected output {expected:?}, but the function under test failed: {error}")]
    UnexpectedError { expected: String, error: String },

    #[error("expected an error containing {expected:?}, but the function returned {actual:?}")]
    UnexpectedSuccess { expected: String, actual: String },

    #[error("expected an error containing {expected:?}, got {error:?}")]
    MessageMismatch { expected: String, error: String },
}

/// A zero-argument test thunk. `Send + Sync` so the host may schedule
/// entries in parallel; each thunk owns its case record and shares nothing
/// mutable with its siblings.
pub type TestFn = Box<dyn Fn() -> Result<(), CaseFailure> + Send + Sync>;

/// One uniquely named, independently invocable test.
pub struct TestEntry {
    ident: String,
    label: String,
    run: TestFn,
}

impl TestEntry {
    /// The identifier this entry is registered under, unique within its suite.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// The human-readable case name, or the identifier when the case was
    /// nameless. Failure reports should surface this.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Invokes the entry's assertion.
    pub fn run(&self) -> Result<(), CaseFailure> {
        (self.run)()
    }
}

impl fmt::Debug for TestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestEntry")
            .field("ident", &self.ident)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of generated tests.
///
/// The suite is also the namespace: identifiers claimed here (including
/// ones reserved by the caller) are never reassigned, so repeated
/// generation into one suite cannot clobber earlier entries.
#[derive(Debug, Default)]
pub struct TestSuite {
    entries: Vec<TestEntry>,
    taken: HashSet<String>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an identifier as taken without binding an entry, protecting a
    /// pre-existing name in the caller's namespace from being clobbered.
    pub fn reserve(&mut self, ident: impl Into<String>) {
        self.taken.insert(ident.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TestEntry> {
        self.entries.iter()
    }

    /// Looks up an entry by its registered identifier.
    pub fn get(&self, ident: &str) -> Option<&TestEntry> {
        self.entries.iter().find(|e| e.ident == ident)
    }

    /// Claims the first free identifier for `candidate`: the candidate
    /// itself, then `_2`, `_3`, ... Deterministic given input order and
    /// prior suite state.
    fn claim(&mut self, candidate: String) -> String {
        if self.taken.insert(candidate.clone()) {
            return candidate;
        }
        let mut suffix = 2usize;
        loop {
            let attempt = format!("{candidate}_{suffix}");
            if self.taken.insert(attempt.clone()) {
                return attempt;
            }
            suffix += 1;
        }
    }
}

impl<'a> IntoIterator for &'a TestSuite {
    type Item = &'a TestEntry;
    type IntoIter = std::slice::Iter<'a, TestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds one entry per case, in the case sequence's original order, into
/// `suite`. Pure side effect on the suite; synthesis itself cannot fail.
pub fn synthesize<F, E>(cases: Vec<TestCase>, f: Arc<F>, prefix: &str, suite: &mut TestSuite)
where
    F: Fn(&str) -> Result<String, E> + Send + Sync + 'static,
    E: fmt::Display,
{
    for (index, case) in cases.into_iter().enumerate() {
        let raw = case
            .name
            .clone()
            .unwrap_or_else(|| format!("case_{index}"));
        let ident = suite.claim(format!("{prefix}{}", slugify(&raw)));
        let label = case.name.clone().unwrap_or_else(|| ident.clone());

        // Each closure binds its own case record; the function under test
        // is shared immutably.
        let fut = Arc::clone(&f);
        let run: TestFn = Box::new(move || check_case(&case, fut.as_ref()));
        suite.entries.push(TestEntry { ident, label, run });
    }
}

/// Runs the assertion for one case. An `error` expectation strictly
/// overrides any `output` expectation; the expected text is matched as a
/// literal substring of the rendered error message, never as a pattern.
fn check_case<F, E>(case: &TestCase, f: &F) -> Result<(), CaseFailure>
where
    F: Fn(&str) -> Result<String, E>,
    E: fmt::Display,
{
    let input = case.input_text();

    if let Some(expected) = case.expected_error() {
        return match f(input) {
            Ok(actual) => Err(CaseFailure::UnexpectedSuccess {
                expected: expected.to_string(),
                actual,
            }),
            Err(e) => {
                let message = e.to_string();
                if message.contains(expected) {
                    Ok(())
                } else {
                    Err(CaseFailure::MessageMismatch {
                        expected: expected.to_string(),
                        error: message,
                    })
                }
            }
        };
    }

    let expected = case.expected_output();
    match f(input) {
        Ok(actual) if actual == expected => Ok(()),
        Ok(actual) => Err(CaseFailure::OutputMismatch {
            expected: expected.to_string(),
            actual,
        }),
        Err(e) => Err(CaseFailure::UnexpectedError {
            expected: expected.to_string(),
            error: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: Option<&str>, input: &str, output: Option<&str>, error: Option<&str>) -> TestCase {
        TestCase {
            name: name.map(str::to_string),
            input: Some(input.to_string()),
            output: output.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    fn upper(s: &str) -> Result<String, String> {
        if s.is_empty() {
            return Err("Input cannot be empty".to_string());
        }
        Ok(s.to_uppercase())
    }

    fn build(cases: Vec<TestCase>) -> TestSuite {
        let mut suite = TestSuite::new();
        synthesize(cases, Arc::new(upper), "test_", &mut suite);
        suite
    }

    #[test]
    fn registers_entries_in_original_order_with_distinct_idents() {
        let suite = build(vec![
            case(Some("First Case"), "a", Some("A"), None),
            case(Some("Second Case"), "b", Some("B"), None),
            case(Some("Third Case"), "c", Some("C"), None),
        ]);
        let idents: Vec<&str> = suite.iter().map(|e| e.ident()).collect();
        assert_eq!(
            idents,
            ["test_first_case", "test_second_case", "test_third_case"]
        );
        assert!(suite.iter().all(|e| e.run().is_ok()));
    }

    #[test]
    fn colliding_names_get_numeric_suffixes_deterministically() {
        let cases = vec![
            case(Some("Same Name"), "a", Some("A"), None),
            case(Some("Same  name!"), "b", Some("B"), None),
            case(Some("same name"), "c", Some("C"), None),
        ];
        let first = build(cases.clone());
        let second = build(cases);
        let idents: Vec<&str> = first.iter().map(|e| e.ident()).collect();
        assert_eq!(
            idents,
            ["test_same_name", "test_same_name_2", "test_same_name_3"]
        );
        let again: Vec<&str> = second.iter().map(|e| e.ident()).collect();
        assert_eq!(idents, again);
    }

    #[test]
    fn reserved_names_are_never_clobbered() {
        let mut suite = TestSuite::new();
        suite.reserve("test_same_name");
        synthesize(
            vec![case(Some("Same Name"), "a", Some("A"), None)],
            Arc::new(upper),
            "test_",
            &mut suite,
        );
        assert_eq!(suite.iter().next().unwrap().ident(), "test_same_name_2");
    }

    #[test]
    fn nameless_cases_use_positional_fallback_and_ident_label() {
        let suite = build(vec![
            case(None, "a", Some("A"), None),
            case(None, "b", Some("B"), None),
        ]);
        let idents: Vec<&str> = suite.iter().map(|e| e.ident()).collect();
        assert_eq!(idents, ["test_case_0", "test_case_1"]);
        assert_eq!(suite.iter().next().unwrap().label(), "test_case_0");
    }

    #[test]
    fn error_cases_pass_on_substring_match_only() {
        let suite = build(vec![
            case(Some("empty input"), "", None, Some("cannot be empty")),
            case(Some("wrong message"), "", None, Some("disk on fire")),
            case(Some("no error at all"), "x", None, Some("cannot be empty")),
        ]);
        let results: Vec<_> = suite.iter().map(|e| e.run()).collect();
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(CaseFailure::MessageMismatch { .. })
        ));
        assert!(matches!(
            results[2],
            Err(CaseFailure::UnexpectedSuccess { .. })
        ));
    }

    #[test]
    fn expected_error_text_is_literal_not_a_pattern() {
        // `.` would match any character if the expectation were a regex.
        let fut = |_: &str| -> Result<String, String> { Err("axb".to_string()) };
        let mut suite = TestSuite::new();
        synthesize(
            vec![case(Some("literal dot"), "x", None, Some("a.b"))],
            Arc::new(fut),
            "test_",
            &mut suite,
        );
        assert!(matches!(
            suite.iter().next().unwrap().run(),
            Err(CaseFailure::MessageMismatch { .. })
        ));
    }

    #[test]
    fn error_expectation_overrides_output_expectation() {
        let suite = build(vec![case(
            Some("both fields"),
            "",
            Some("ignored"),
            Some("cannot be empty"),
        )]);
        assert!(suite.iter().next().unwrap().run().is_ok());
    }

    #[test]
    fn success_cases_compare_by_exact_value_equality() {
        let suite = build(vec![
            case(Some("exact"), "ab", Some("AB"), None),
            case(Some("mismatch"), "ab", Some("ab"), None),
            case(Some("unexpected failure"), "", Some(""), None),
        ]);
        let results: Vec<_> = suite.iter().map(|e| e.run()).collect();
        assert!(results[0].is_ok());
        assert_eq!(
            results[1],
            Err(CaseFailure::OutputMismatch {
                expected: "ab".to_string(),
                actual: "AB".to_string(),
            })
        );
        assert!(matches!(
            results[2],
            Err(CaseFailure::UnexpectedError { .. })
        ));
    }

    #[test]
    fn absent_input_and_output_default_to_empty_text() {
        let echo = |s: &str| -> Result<String, String> { Ok(s.to_string()) };
        let mut suite = TestSuite::new();
        synthesize(
            vec![TestCase {
                name: Some("all defaults".to_string()),
                ..TestCase::default()
            }],
            Arc::new(echo),
            "test_",
            &mut suite,
        );
        assert!(suite.iter().next().unwrap().run().is_ok());
    }

    #[test]
    fn entries_are_addressable_by_ident() {
        let suite = build(vec![case(Some("Find Me"), "a", Some("A"), None)]);
        assert!(suite.get("test_find_me").is_some());
        assert!(suite.get("test_missing").is_none());
    }
}

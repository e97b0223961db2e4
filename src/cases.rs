//! Case records produced by the external parsing CLI.
//!
//! Records are consumed read-only. Every field may be absent in the wire
//! format; absence is defaulted here, at consumption time, rather than
//! rejected during envelope validation.

use serde::Deserialize;

/// A single declarative test case from a parsed document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestCase {
    /// Human-readable label. Not guaranteed unique across a document.
    pub name: Option<String>,
    /// Text fed to the function under test.
    pub input: Option<String>,
    /// Expected return value when no error is expected.
    pub output: Option<String>,
    /// Expected error-message substring. Presence switches the case to
    /// error-assertion mode and overrides any `output` expectation.
    pub error: Option<String>,
}

impl TestCase {
    /// Text fed to the function under test; absent means empty.
    pub fn input_text(&self) -> &str {
        self.input.as_deref().unwrap_or("")
    }

    /// Expected return value for success cases; absent means empty.
    pub fn expected_output(&self) -> &str {
        self.output.as_deref().unwrap_or("")
    }

    /// Expected error substring, if this case asserts failure.
    pub fn expected_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Result envelope emitted by the CLI: a mapping with a required `tests`
/// sequence of case records, in document order.
#[derive(Debug, Deserialize)]
pub struct CaseList {
    pub tests: Vec<TestCase>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_default_to_empty_text() {
        let case = TestCase::default();
        assert_eq!(case.input_text(), "");
        assert_eq!(case.expected_output(), "");
        assert!(case.expected_error().is_none());
    }

    #[test]
    fn error_presence_switches_assertion_mode() {
        let case: TestCase =
            serde_json::from_str(r#"{"name":"boom","input":"x","error":"bad input"}"#).unwrap();
        assert_eq!(case.expected_error(), Some("bad input"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let case: TestCase =
            serde_json::from_str(r#"{"name":"n","input":"i","output":"o","files":{}}"#).unwrap();
        assert_eq!(case.expected_output(), "o");
    }
}

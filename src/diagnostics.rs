//! Unified, `miette`-based error type for the adapter.
//!
//! Every failure mode of a `generate` call is represented here. All of
//! these abort the entire generation for the document in question; partial
//! suites are never produced. Per-case assertion failures are *not* errors
//! of this type — they are [`CaseFailure`](crate::suite::CaseFailure)
//! values returned by generated entries when the host later invokes them.

use std::process::ExitStatus;

use miette::Diagnostic;
use thiserror::Error;

/// Type-safe classification of [`MdtestError`] variants, for matching in
/// tests without destructuring variant payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The external CLI is missing from the executable search path.
    ToolNotFound,
    /// Programmer misuse of the invocation contract.
    InvalidArgument,
    /// The external CLI ran (or failed to launch) and reported failure.
    ToolExecutionFailed,
    /// The CLI's standard output was not a single JSON value.
    MalformedOutput,
    /// The parsed value was not a mapping holding a `tests` sequence.
    UnexpectedOutputShape,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ToolNotFound => "ToolNotFound",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::ToolExecutionFailed => "ToolExecutionFailed",
            ErrorKind::MalformedOutput => "MalformedOutput",
            ErrorKind::UnexpectedOutputShape => "UnexpectedOutputShape",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All failure modes of invoking the external CLI and validating its output.
#[derive(Debug, Error, Diagnostic)]
pub enum MdtestError {
    #[error("`{tool}` CLI not found on PATH")]
    #[diagnostic(
        code(mdtest::tool_not_found),
        help("Install it globally with `npm i -g {tool}`.")
    )]
    ToolNotFound { tool: String },

    #[error("expected exactly one document path, got {count}")]
    #[diagnostic(code(mdtest::invalid_argument))]
    InvalidArgument { count: usize },

    #[error("`{tool}` CLI failed ({status})")]
    #[diagnostic(code(mdtest::tool_execution_failed))]
    ToolExecutionFailed {
        tool: String,
        status: ExitStatus,
        /// Captured diagnostic stream, already surfaced to stderr.
        stderr: String,
    },

    /// The tool resolved but the process could not be spawned.
    #[error("failed to execute `{tool}`")]
    #[diagnostic(code(mdtest::tool_execution_failed))]
    ToolLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{tool}` CLI emitted output that is not valid JSON")]
    #[diagnostic(code(mdtest::malformed_output))]
    MalformedOutput {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected `{tool}` CLI output shape: {reason}")]
    #[diagnostic(
        code(mdtest::unexpected_output_shape),
        help("expected a JSON object with a `tests` array")
    )]
    UnexpectedOutputShape { tool: String, reason: String },
}

impl MdtestError {
    /// Returns the classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MdtestError::ToolNotFound { .. } => ErrorKind::ToolNotFound,
            MdtestError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            MdtestError::ToolExecutionFailed { .. } => ErrorKind::ToolExecutionFailed,
            // A launch failure is still the tool failing to run.
            MdtestError::ToolLaunch { .. } => ErrorKind::ToolExecutionFailed,
            MdtestError::MalformedOutput { .. } => ErrorKind::MalformedOutput,
            MdtestError::UnexpectedOutputShape { .. } => ErrorKind::UnexpectedOutputShape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_help_carries_install_hint() {
        let err = MdtestError::ToolNotFound {
            tool: "mdtest".to_string(),
        };
        let help = Diagnostic::help(&err).map(|h| h.to_string());
        assert_eq!(
            help.as_deref(),
            Some("Install it globally with `npm i -g mdtest`.")
        );
        assert_eq!(err.kind(), ErrorKind::ToolNotFound);
    }

    #[test]
    fn launch_failures_classify_as_execution_failures() {
        let err = MdtestError::ToolLaunch {
            tool: "mdtest".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.kind(), ErrorKind::ToolExecutionFailed);
    }
}

//! Invocation of the external parsing CLI.
//!
//! The CLI is an opaque collaborator: it takes one document path, and on
//! success prints a single JSON value to stdout. This module resolves the
//! executable, runs it with stdout and stderr captured separately, and
//! validates the envelope shape. One child process per invocation, no
//! retry; any failure here aborts the whole generation call.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

use crate::cases::CaseList;
use crate::diagnostics::MdtestError;
use crate::GenerateConfig;

/// Locates the configured executable on the search path.
///
/// A bare name is searched on PATH; a name containing a path separator is
/// checked directly, which lets tests point at fixture stubs.
pub fn resolve(config: &GenerateConfig) -> Result<PathBuf, MdtestError> {
    which::which(&config.tool).map_err(|_| MdtestError::ToolNotFound {
        tool: config.tool.clone(),
    })
}

/// Runs the CLI on a single document and returns the validated case list.
///
/// The slice form enforces the invocation contract: exactly one document
/// per call. Any other count is programmer misuse, reported before the
/// executable is even resolved.
pub fn invoke(config: &GenerateConfig, documents: &[&Path]) -> Result<CaseList, MdtestError> {
    if documents.len() != 1 {
        return Err(MdtestError::InvalidArgument {
            count: documents.len(),
        });
    }
    let bin = resolve(config)?;
    let output = Command::new(&bin)
        .arg(documents[0])
        .output()
        .map_err(|source| MdtestError::ToolLaunch {
            tool: config.tool.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        // Forward the tool's own diagnostics before failing. Stdout is
        // discarded unparsed on a nonzero exit.
        eprint!("{stderr}");
        return Err(MdtestError::ToolExecutionFailed {
            tool: config.tool.clone(),
            status: output.status,
            stderr,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_output(&config.tool, &stdout)
}

/// Validates the result envelope: one JSON value, a mapping, holding a
/// `tests` sequence. Field-level absence inside records is left to the
/// consumption-time defaults in [`crate::cases`].
fn parse_output(tool: &str, stdout: &str) -> Result<CaseList, MdtestError> {
    let value: Value =
        serde_json::from_str(stdout).map_err(|source| MdtestError::MalformedOutput {
            tool: tool.to_string(),
            source,
        })?;

    let Value::Object(ref fields) = value else {
        return Err(MdtestError::UnexpectedOutputShape {
            tool: tool.to_string(),
            reason: "top-level value is not an object".to_string(),
        });
    };
    if !fields.contains_key("tests") {
        return Err(MdtestError::UnexpectedOutputShape {
            tool: tool.to_string(),
            reason: "missing `tests` field".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| MdtestError::UnexpectedOutputShape {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

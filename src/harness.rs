//! Host-side execution and reporting for generated suites.
//!
//! Generation itself never touches a test framework; this module is the
//! thin shim that runs a [`TestSuite`] and reports outcomes. Hosts that
//! discover tests through `cargo test` call [`Summary::assert_all_passed`]
//! inside a `#[test]` function; other hosts can iterate the suite and
//! report however they like.

use crate::diagnostics::MdtestError;
use crate::suite::{CaseFailure, TestSuite};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration for suite execution and reporting.
pub struct RunConfig {
    pub use_colors: bool,
    /// Case-insensitive substring filter on entry labels.
    pub filter: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stderr),
            filter: None,
        }
    }
}

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

impl RunConfig {
    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn skip_reason(&self, label: &str) -> Option<String> {
        if let Some(f) = &self.filter {
            if !label.to_lowercase().contains(&f.to_lowercase()) {
                return Some(format!("filtered out by substring: {}", f));
            }
        }
        None
    }
}

// =============================================================================
// EXECUTION
// =============================================================================

/// Outcome of one executed entry.
#[derive(Debug)]
pub enum RunResult {
    Pass {
        ident: String,
        label: String,
    },
    Fail {
        ident: String,
        label: String,
        failure: CaseFailure,
    },
    Skipped {
        ident: String,
        label: String,
        reason: String,
    },
}

/// Aggregated outcomes of one suite run, in entry order.
#[derive(Debug)]
pub struct Summary {
    pub results: Vec<RunResult>,
}

impl Summary {
    pub fn passed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, RunResult::Pass { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, RunResult::Fail { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, RunResult::Skipped { .. }))
            .count()
    }

    /// Panics with the failed labels. This is the bridge into hosts whose
    /// native failure primitive is a panic (`#[test]` under `cargo test`).
    pub fn assert_all_passed(&self) {
        let failed: Vec<String> = self
            .results
            .iter()
            .filter_map(|r| match r {
                RunResult::Fail { label, failure, .. } => {
                    Some(format!("{}: {}", label, failure))
                }
                _ => None,
            })
            .collect();
        assert!(
            failed.is_empty(),
            "generated tests failed:\n  {}",
            failed.join("\n  ")
        );
    }
}

/// Executes every entry in order and collects per-entry outcomes.
///
/// The suite controls nothing about scheduling beyond order here; entries
/// are independently invocable and a host may run them in parallel instead.
pub fn run_suite(suite: &TestSuite, config: &RunConfig) -> Summary {
    let results = suite
        .iter()
        .map(|entry| {
            if let Some(reason) = config.skip_reason(entry.label()) {
                return RunResult::Skipped {
                    ident: entry.ident().to_string(),
                    label: entry.label().to_string(),
                    reason,
                };
            }
            match entry.run() {
                Ok(()) => RunResult::Pass {
                    ident: entry.ident().to_string(),
                    label: entry.label().to_string(),
                },
                Err(failure) => RunResult::Fail {
                    ident: entry.ident().to_string(),
                    label: entry.label().to_string(),
                    failure,
                },
            }
        })
        .collect();
    Summary { results }
}

// =============================================================================
// REPORTING
// =============================================================================

/// Print one line per result and a trailing summary.
pub fn report_results(summary: &Summary, config: &RunConfig) {
    for r in &summary.results {
        match r {
            RunResult::Pass { label, .. } => {
                println!("{}: {}", config.colorize("PASS", GREEN), label)
            }
            RunResult::Fail { label, failure, .. } => {
                eprintln!("{}: {}", config.colorize("FAIL", RED), label);
                eprintln!("  {}", failure);
            }
            RunResult::Skipped { label, reason, .. } => {
                println!("{}: {} ({})", config.colorize("SKIP", YELLOW), label, reason)
            }
        }
    }

    println!(
        "\nTest summary: total {}, {} {}, {} {}, {} {}",
        summary.results.len(),
        config.colorize("passed", GREEN),
        summary.passed(),
        config.colorize("failed", RED),
        summary.failed(),
        config.colorize("skipped", YELLOW),
        summary.skipped(),
    );
}

/// Generates a suite from a document, runs it with default settings, and
/// reports the results. Convenience wrapper for one-document hosts.
pub fn run_document<P, F, E>(document: P, f: F) -> Result<Summary, MdtestError>
where
    P: AsRef<std::path::Path>,
    F: Fn(&str) -> Result<String, E> + Send + Sync + 'static,
    E: std::fmt::Display,
{
    let suite = crate::generate(document, f)?;
    let config = RunConfig::default();
    let summary = run_suite(&suite, &config);
    report_results(&summary, &config);
    Ok(summary)
}

//! Adapter for generating Rust test suites from TestMark documents.
//!
//! A TestMark document declares test cases (name, input, expected output or
//! expected error) for an arbitrary text-to-text function. The external
//! `mdtest` CLI parses such documents into normalized JSON; this crate
//! invokes that CLI, validates its output, and synthesizes one uniquely
//! named test entry per case.
//!
//! # Example
//!
//! ```rust,no_run
//! use mdtest::harness;
//!
//! fn shout(s: &str) -> Result<String, String> {
//!     if s.is_empty() {
//!         return Err("Input cannot be empty".to_string());
//!     }
//!     Ok(s.to_uppercase())
//! }
//!
//! let suite = mdtest::generate("docs/shout.test.md", shout).unwrap();
//! harness::run_suite(&suite, &harness::RunConfig::default()).assert_all_passed();
//! ```

pub use crate::cases::{CaseList, TestCase};
pub use crate::diagnostics::{ErrorKind, MdtestError};
pub use crate::suite::{CaseFailure, TestEntry, TestSuite};

pub mod cases;
pub mod diagnostics;
pub mod harness;
pub mod naming;
pub mod suite;
pub mod tool;

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

/// Configuration for test generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Executable name of the external parsing CLI. A bare name is resolved
    /// on PATH; a name containing a path separator is used directly.
    pub tool: String,
    /// Marker prefixed to every derived identifier.
    pub prefix: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            tool: "mdtest".to_string(),
            prefix: "test_".to_string(),
        }
    }
}

/// Parses `document` with the default configuration and returns a fresh
/// suite holding one entry per case, in document order.
///
/// Any invoker failure aborts the whole call; a partial suite is never
/// returned.
pub fn generate<P, F, E>(document: P, f: F) -> Result<TestSuite, MdtestError>
where
    P: AsRef<Path>,
    F: Fn(&str) -> Result<String, E> + Send + Sync + 'static,
    E: Display,
{
    generate_with(&GenerateConfig::default(), document, f)
}

/// Like [`generate`], but registers into an existing suite, respecting the
/// identifiers it has already claimed or reserved.
pub fn generate_into<P, F, E>(document: P, f: F, suite: &mut TestSuite) -> Result<(), MdtestError>
where
    P: AsRef<Path>,
    F: Fn(&str) -> Result<String, E> + Send + Sync + 'static,
    E: Display,
{
    generate_with_into(&GenerateConfig::default(), document, f, suite)
}

/// [`generate`] with an explicit configuration.
pub fn generate_with<P, F, E>(
    config: &GenerateConfig,
    document: P,
    f: F,
) -> Result<TestSuite, MdtestError>
where
    P: AsRef<Path>,
    F: Fn(&str) -> Result<String, E> + Send + Sync + 'static,
    E: Display,
{
    let mut suite = TestSuite::new();
    generate_with_into(config, document, f, &mut suite)?;
    Ok(suite)
}

/// [`generate_into`] with an explicit configuration.
///
/// The external CLI runs to completion before any entry is built, so an
/// error here leaves `suite` untouched.
pub fn generate_with_into<P, F, E>(
    config: &GenerateConfig,
    document: P,
    f: F,
    suite: &mut TestSuite,
) -> Result<(), MdtestError>
where
    P: AsRef<Path>,
    F: Fn(&str) -> Result<String, E> + Send + Sync + 'static,
    E: Display,
{
    let cases = tool::invoke(config, &[document.as_ref()])?;
    suite::synthesize(cases.tests, Arc::new(f), &config.prefix, suite);
    Ok(())
}

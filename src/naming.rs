//! Identifier derivation for generated tests.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Reduces a human-readable case name to a `[a-z0-9_]` identifier stem.
///
/// Trims and lower-cases the text, replaces each maximal run of other
/// characters with a single `_`, strips edge separators, and falls back to
/// the literal `case` when nothing survives.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let collapsed = NON_ALNUM.replace_all(&lowered, "_");
    let trimmed = collapsed.trim_matches('_');
    if trimmed.is_empty() {
        "case".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_strips_edges() {
        assert_eq!(slugify("Trims Extra   Spaces!!"), "trims_extra_spaces");
        assert_eq!(slugify("Hello, World!"), "hello_world");
        assert_eq!(slugify("  MiXeD-Case_09  "), "mixed_case_09");
    }

    #[test]
    fn empty_and_symbol_only_names_fall_back() {
        assert_eq!(slugify(""), "case");
        assert_eq!(slugify("   "), "case");
        assert_eq!(slugify("!!!"), "case");
    }

    #[test]
    fn positional_fallbacks_pass_through() {
        assert_eq!(slugify("case_7"), "case_7");
    }
}

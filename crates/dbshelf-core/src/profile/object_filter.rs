//! Schema/catalog object-name filters
//!
//! A filter is an ordered list of match expressions plus a flag saying
//! whether matching names are included or excluded. Expressions use a
//! simplified SQL-LIKE wildcard syntax: a trailing `%` stands for "zero or
//! more characters". That is the only wildcard position the translator
//! handles; a `%` anywhere else stays literal.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// An ordered set of name-match expressions with an include/exclude flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectNameFilter {
    /// Match expressions in simplified wildcard syntax
    #[serde(default)]
    expressions: Vec<String>,
    /// `true`: keep matching names; `false`: drop matching names
    #[serde(default = "default_inclusion")]
    inclusion: bool,
}

fn default_inclusion() -> bool {
    true
}

impl ObjectNameFilter {
    #[must_use]
    pub fn new(expressions: Vec<String>, inclusion: bool) -> Self {
        Self {
            expressions,
            inclusion,
        }
    }

    /// Build a filter from a comma- or newline-separated definition string
    ///
    /// Expressions are trimmed; empty entries are dropped.
    #[must_use]
    pub fn from_definition(definition: &str, inclusion: bool) -> Self {
        let expressions = definition
            .split(|c| c == ',' || c == '\n')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from)
            .collect();
        Self {
            expressions,
            inclusion,
        }
    }

    #[must_use]
    pub fn expressions(&self) -> &[String] {
        &self.expressions
    }

    #[must_use]
    pub fn is_inclusion(&self) -> bool {
        self.inclusion
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Whether any expression matches the given name (case-insensitive)
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.expressions.iter().any(|expr| {
            let pattern = pattern_to_regex(expr);
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(re) => re.is_match(name),
                Err(err) => {
                    tracing::warn!(expression = %expr, %err, "skipping invalid filter expression");
                    false
                }
            }
        })
    }

    /// Whether a name passes the filter, honoring the include/exclude flag
    ///
    /// A filter without expressions passes everything.
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        if self.expressions.is_empty() {
            return true;
        }
        if self.inclusion {
            self.matches(name)
        } else {
            !self.matches(name)
        }
    }
}

/// Convert a simplified wildcard expression to a regular expression
///
/// Only a trailing `%` becomes `.*`; the pattern is anchored with a leading
/// `^` if one is not already present.
#[must_use]
pub fn pattern_to_regex(expression: &str) -> String {
    let mut pattern = match expression.strip_suffix('%') {
        Some(prefix) => format!("{prefix}.*"),
        None => expression.to_string(),
    };
    if !pattern.starts_with('^') {
        pattern.insert(0, '^');
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_wildcard() {
        assert_eq!(pattern_to_regex("PG_%"), "^PG_.*");
    }

    #[test]
    fn test_no_wildcard_is_anchored_verbatim() {
        assert_eq!(pattern_to_regex("INFORMATION_SCHEMA"), "^INFORMATION_SCHEMA");
    }

    #[test]
    fn test_interior_percent_stays_literal() {
        assert_eq!(pattern_to_regex("A%B"), "^A%B");
    }

    #[test]
    fn test_existing_anchor_is_kept() {
        assert_eq!(pattern_to_regex("^sys.*"), "^sys.*");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let filter = ObjectNameFilter::new(vec!["pg_%".to_string()], true);
        assert!(filter.matches("PG_CATALOG"));
        assert!(!filter.matches("information_schema"));
    }

    #[test]
    fn test_includes_honors_exclusion_flag() {
        let filter = ObjectNameFilter::new(vec!["pg_%".to_string()], false);
        assert!(!filter.includes("pg_catalog"));
        assert!(filter.includes("public"));
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = ObjectNameFilter::default();
        assert!(filter.includes("anything"));
    }

    #[test]
    fn test_from_definition_splits_and_trims() {
        let filter = ObjectNameFilter::from_definition("pg_%, sys\n temp_% ,", true);
        assert_eq!(filter.expressions(), &["pg_%", "sys", "temp_%"]);
    }
}

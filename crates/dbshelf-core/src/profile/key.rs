//! Profile lookup keys
//!
//! A [`ProfileKey`] identifies a profile by `(name, group)` and is parsed
//! from the combined `{group}/name` syntax used on the command line and in
//! saved-state references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a profile key
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// A `{`-prefixed key without its closing brace
    #[error("malformed profile key '{0}': missing closing '}}'")]
    Malformed(String),
}

/// Identifies a profile by name and (optionally) group
///
/// Used only for lookup, never for storage. Equality is deliberately loose
/// on the group: a key without a group matches a key of the same name in
/// any group. Saved references such as "last used profile" rely on this, so
/// the relation is not transitive and the type implements neither `Eq` nor
/// `Hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileKey {
    name: String,
    group: Option<String>,
}

impl ProfileKey {
    /// Key with no group; matches the name in any group
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            group: None,
        }
    }

    /// Key bound to a specific group; a blank group is treated as unset
    #[must_use]
    pub fn with_group(name: &str, group: &str) -> Self {
        let group = group.trim();
        Self {
            name: name.trim().to_string(),
            group: if group.is_empty() {
                None
            } else {
                Some(group.to_string())
            },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

impl PartialEq for ProfileKey {
    /// Names must match exactly; groups only break the comparison when both
    /// are set and differ.
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name {
            return false;
        }
        match (&self.group, &other.group) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl FromStr for ProfileKey {
    type Err = KeyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if let Some(rest) = input.strip_prefix('{') {
            let end = rest
                .find('}')
                .ok_or_else(|| KeyError::Malformed(input.to_string()))?;
            let group = &rest[..end];
            let after = &rest[end + 1..];
            let name = match after.find('/') {
                Some(slash) => &after[slash + 1..],
                None => after,
            };
            Ok(Self::with_group(name, group))
        } else if let Some((group, name)) = input.split_once('/') {
            Ok(Self::with_group(name, group))
        } else {
            Ok(Self::new(input))
        }
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{{{group}}}/{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_braced_group() {
        let key: ProfileKey = "{Work}/Prod DB".parse().unwrap();
        assert_eq!(key.name(), "Prod DB");
        assert_eq!(key.group(), Some("Work"));
    }

    #[test]
    fn test_parse_braced_group_without_slash() {
        let key: ProfileKey = "{Work}Prod DB".parse().unwrap();
        assert_eq!(key.name(), "Prod DB");
        assert_eq!(key.group(), Some("Work"));

        let key: ProfileKey = "{Work}".parse().unwrap();
        assert_eq!(key.name(), "");
        assert_eq!(key.group(), Some("Work"));
    }

    #[test]
    fn test_parse_slash_syntax() {
        let key: ProfileKey = "Work/Prod DB".parse().unwrap();
        assert_eq!(key.name(), "Prod DB");
        assert_eq!(key.group(), Some("Work"));
    }

    #[test]
    fn test_parse_bare_name() {
        let key: ProfileKey = "  Prod DB  ".parse().unwrap();
        assert_eq!(key.name(), "Prod DB");
        assert_eq!(key.group(), None);
    }

    #[test]
    fn test_parse_components_are_trimmed() {
        let key: ProfileKey = "{ Work } / Prod DB ".parse().unwrap();
        assert_eq!(key.name(), "Prod DB");
        assert_eq!(key.group(), Some("Work"));
    }

    #[test]
    fn test_parse_missing_closing_brace() {
        let err = "{Work/Prod DB".parse::<ProfileKey>().unwrap_err();
        assert_eq!(err, KeyError::Malformed("{Work/Prod DB".to_string()));
    }

    #[test]
    fn test_unset_group_matches_any_group() {
        let bare: ProfileKey = "Prod DB".parse().unwrap();
        let scoped: ProfileKey = "{Work}/Prod DB".parse().unwrap();
        assert_eq!(bare, scoped);
        assert_eq!(scoped, bare);
    }

    #[test]
    fn test_differing_groups_do_not_match() {
        let home: ProfileKey = "{Home}/Prod DB".parse().unwrap();
        let work: ProfileKey = "{Work}/Prod DB".parse().unwrap();
        assert_ne!(home, work);
    }

    #[test]
    fn test_differing_names_do_not_match() {
        let a: ProfileKey = "Prod DB".parse().unwrap();
        let b: ProfileKey = "prod db".parse().unwrap();
        assert_ne!(a, b, "names are case-sensitive");
    }

    #[test]
    fn test_display_round_trip() {
        let key = ProfileKey::with_group("Prod DB", "Work");
        assert_eq!(key.to_string(), "{Work}/Prod DB");
        let reparsed: ProfileKey = key.to_string().parse().unwrap();
        assert_eq!(reparsed.name(), "Prod DB");
        assert_eq!(reparsed.group(), Some("Work"));

        assert_eq!(ProfileKey::new("Prod DB").to_string(), "Prod DB");
    }
}

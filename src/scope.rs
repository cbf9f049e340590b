//! Granted scope tokens.

use std::collections::BTreeSet;

/// The set of scopes granted to a principal.
///
/// Built from a whitespace-separated scope string. Tokens compare
/// case-sensitively and by exact match; there are no wildcards or
/// hierarchies. Duplicate tokens collapse.
///
/// # Examples
///
/// ```
/// use scope_authz::ScopeSet;
///
/// let granted = ScopeSet::parse("user manager");
///
/// assert!(granted.contains("user"));
/// assert!(granted.intersects(&["admin", "manager"]));
/// assert!(!granted.intersects(&["User"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet {
    tokens: BTreeSet<String>,
}

impl ScopeSet {
    /// Splits `raw` on any whitespace into a set of tokens.
    pub fn parse(raw: &str) -> Self {
        Self {
            tokens: raw.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// Returns true if `scope` is granted.
    pub fn contains(&self, scope: &str) -> bool {
        self.tokens.contains(scope)
    }

    /// Returns true if at least one of `required` is granted.
    pub fn intersects<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().any(|s| self.contains(s.as_ref()))
    }

    /// Returns the required scopes that are granted, in the order given.
    pub fn matching<'r, S: AsRef<str>>(&self, required: &'r [S]) -> Vec<&'r str> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| self.contains(s))
            .collect()
    }

    /// Iterates over the granted tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns the number of distinct granted tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

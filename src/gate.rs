use crate::{authorizer::authorize, error::ScopeError, request::RequestMeta};

/// Builder for a per-route scope requirement.
///
/// Collects required scopes one at a time and checks them against the
/// request's principal. Passing the check requires holding at least one of
/// the collected scopes.
///
/// # Examples
///
/// ```
/// use scope_authz::{Principal, RequestMeta, ScopeGate};
///
/// let meta = RequestMeta::new("req-123").with_principal(Principal::new("user manager"));
///
/// ScopeGate::new(&meta)
///     .require("admin")
///     .require("manager")
///     .check()
///     .expect("manager is granted");
/// ```
#[derive(Debug)]
pub struct ScopeGate<'a> {
    meta: &'a RequestMeta,
    requirements: Vec<String>,
}

impl<'a> ScopeGate<'a> {
    /// Creates a gate for the given request with no requirements.
    pub fn new(meta: &'a RequestMeta) -> Self {
        Self {
            meta,
            requirements: Vec::new(),
        }
    }

    /// Adds a required scope, ignoring duplicates.
    ///
    /// Insertion order is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_authz::{RequestMeta, ScopeGate};
    ///
    /// let meta = RequestMeta::new("req-1");
    /// let gate = ScopeGate::new(&meta)
    ///     .require("read")
    ///     .require("read"); // second call is deduplicated
    ///
    /// assert_eq!(gate.requirements(), ["read".to_string()]);
    /// ```
    pub fn require(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();

        if !self.requirements.contains(&scope) {
            self.requirements.push(scope);
        }

        self
    }

    /// Adds every scope in `scopes`, ignoring duplicates.
    pub fn require_any<I, S>(self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        scopes.into_iter().fold(self, |gate, s| gate.require(s))
    }

    /// Returns the collected requirements.
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Runs the check.
    ///
    /// # Errors
    ///
    /// Returns the first failing check. A gate with no requirements fails
    /// with `InvalidArgument`.
    pub fn check(&self) -> Result<(), ScopeError> {
        authorize(&self.requirements, self.meta.principal.as_ref())
    }
}

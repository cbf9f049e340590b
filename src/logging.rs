use crate::error::ScopeError;

/// Structured logger for authorization decisions.
///
/// Every message carries the request ID and the required scopes so that a
/// decision can be correlated with the request that triggered it.
#[derive(Debug)]
pub(crate) struct DecisionLog<'a> {
    request_id: &'a str,
    required: &'a [String],
}

// Level must be a callsite constant, so the branch picks the macro.
macro_rules! granted_event {
    ($level:ident, $request_id:expr, $required:expr, $matched:expr) => {
        tracing::$level!(
            target: "scope_authz",
            request_id = %$request_id,
            required = ?$required,
            matched = ?$matched,
            outcome = "granted",
            "scope check passed"
        )
    };
}

impl<'a> DecisionLog<'a> {
    pub(crate) fn new(request_id: &'a str, required: &'a [String]) -> Self {
        Self {
            request_id,
            required,
        }
    }

    /// Logs a granted decision with the required scopes that matched.
    /// `loud` raises it from debug to info.
    pub(crate) fn granted(&self, loud: bool, matched: &[&str]) {
        if loud {
            granted_event!(info, self.request_id, self.required, matched);
        } else {
            granted_event!(debug, self.request_id, self.required, matched);
        }
    }

    /// Logs a failed decision. `scope_type` is the JSON type of the
    /// principal's scope claim, when a principal was present.
    pub(crate) fn failed(&self, err: &ScopeError, scope_type: Option<&str>) {
        tracing::warn!(
            target: "scope_authz",
            request_id = %self.request_id,
            required = ?self.required,
            outcome = "failed",
            kind = %err.kind(),
            scope_type = scope_type.unwrap_or("<none>"),
            "{}",
            err
        );
    }
}

//! Audit event schema.

use std::fmt;

use crate::error::{ScopeError, ScopeErrorKind};

/// Outcome of an audited scope check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// At least one required scope was granted
    Granted,
    /// The principal was missing or lacked every required scope
    Denied,
    /// The check could not run: empty requirements or a malformed scope claim
    Rejected,
}

impl AuditOutcome {
    /// Classifies a check result.
    pub fn of(result: &Result<(), ScopeError>) -> Self {
        match result {
            Ok(()) => AuditOutcome::Granted,
            Err(e) => match e.kind() {
                ScopeErrorKind::PreconditionFailed | ScopeErrorKind::Forbidden => {
                    AuditOutcome::Denied
                }
                ScopeErrorKind::InvalidArgument | ScopeErrorKind::InvalidState => {
                    AuditOutcome::Rejected
                }
            },
        }
    }
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::Granted => write!(f, "granted"),
            AuditOutcome::Denied => write!(f, "denied"),
            AuditOutcome::Rejected => write!(f, "rejected"),
        }
    }
}

/// A record of one scope check.
///
/// # Example
///
/// ```
/// use scope_authz::audit::{AuditEvent, AuditOutcome};
///
/// let event = AuditEvent::new("req-123", Some("user-1"), &["read"], &Ok(()));
///
/// assert_eq!(event.request_id(), "req-123");
/// assert_eq!(event.outcome(), AuditOutcome::Granted);
/// assert!(event.reason().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    request_id: String,
    principal: Option<String>,
    required: Vec<String>,
    outcome: AuditOutcome,
    reason: Option<ScopeErrorKind>,
}

impl AuditEvent {
    /// Creates an event from the inputs and result of a check.
    pub fn new<S: AsRef<str>>(
        request_id: impl Into<String>,
        principal: Option<impl Into<String>>,
        required: &[S],
        result: &Result<(), ScopeError>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            principal: principal.map(Into::into),
            required: required.iter().map(|s| s.as_ref().to_owned()).collect(),
            outcome: AuditOutcome::of(result),
            reason: result.as_ref().err().map(ScopeError::kind),
        }
    }

    /// Returns the request identifier.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal label, if a principal was present.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    /// Returns the required scopes, in the order they were checked.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> AuditOutcome {
        self.outcome
    }

    /// Returns the failure kind, if the check failed.
    pub fn reason(&self) -> Option<ScopeErrorKind> {
        self.reason
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[outcome={}, request_id={}, principal={}, required=[{}]",
            self.outcome,
            self.request_id,
            self.principal.as_deref().unwrap_or("<none>"),
            self.required.join(" ")
        )?;

        if let Some(reason) = self.reason {
            write!(f, ", reason={}", reason)?;
        }

        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(kind: ScopeErrorKind) -> Result<(), ScopeError> {
        Err(ScopeError::new(kind))
    }

    #[test]
    fn outcome_display() {
        assert_eq!(AuditOutcome::Granted.to_string(), "granted");
        assert_eq!(AuditOutcome::Denied.to_string(), "denied");
        assert_eq!(AuditOutcome::Rejected.to_string(), "rejected");
    }

    #[test]
    fn outcome_classification() {
        assert_eq!(AuditOutcome::of(&Ok(())), AuditOutcome::Granted);
        assert_eq!(
            AuditOutcome::of(&err(ScopeErrorKind::Forbidden)),
            AuditOutcome::Denied
        );
        assert_eq!(
            AuditOutcome::of(&err(ScopeErrorKind::PreconditionFailed)),
            AuditOutcome::Denied
        );
        assert_eq!(
            AuditOutcome::of(&err(ScopeErrorKind::InvalidArgument)),
            AuditOutcome::Rejected
        );
        assert_eq!(
            AuditOutcome::of(&err(ScopeErrorKind::InvalidState)),
            AuditOutcome::Rejected
        );
    }

    #[test]
    fn denied_event_carries_reason() {
        let event = AuditEvent::new(
            "req-1",
            Some("user-1"),
            &["admin"],
            &err(ScopeErrorKind::Forbidden),
        );

        assert_eq!(event.outcome(), AuditOutcome::Denied);
        assert_eq!(event.reason(), Some(ScopeErrorKind::Forbidden));
        assert_eq!(event.required(), ["admin".to_string()]);
    }

    #[test]
    fn display_includes_metadata() {
        let event = AuditEvent::new(
            "req-display",
            Some("user-1"),
            &["read", "write"],
            &err(ScopeErrorKind::Forbidden),
        );

        let display = event.to_string();
        assert!(display.contains("req-display"));
        assert!(display.contains("user-1"));
        assert!(display.contains("required=[read write]"));
        assert!(display.contains("reason=forbidden"));
    }

    #[test]
    fn anonymous_event() {
        let event = AuditEvent::new(
            "req-anon",
            None::<String>,
            &["read"],
            &err(ScopeErrorKind::PreconditionFailed),
        );

        assert!(event.principal().is_none());
        assert!(event.to_string().contains("<none>"));
    }
}

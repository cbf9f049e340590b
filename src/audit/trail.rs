//! Audit sinks.

use std::sync::{Mutex, MutexGuard};

use super::AuditEvent;

/// Destination for audit events.
///
/// Implementations must be shareable across request handlers.
pub trait AuditSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: AuditEvent);
}

/// Emits audit events as structured `tracing` entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn record(&self, event: AuditEvent) {
        tracing::info!(
            target: "scope_audit",
            request_id = %event.request_id(),
            principal = ?event.principal(),
            required = ?event.required(),
            outcome = %event.outcome(),
            reason = ?event.reason().map(|k| k.as_str()),
            "audit event"
        );
    }
}

/// In-memory recorder for audit events.
///
/// Events are kept in the order they were recorded. Useful in tests and as
/// a buffer in front of a persistent audit store.
///
/// # Example
///
/// ```
/// use scope_authz::audit::{AuditEvent, AuditSink, AuditTrail};
///
/// let trail = AuditTrail::new();
/// trail.record(AuditEvent::new("req-123", Some("user-1"), &["read"], &Ok(())));
///
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct AuditTrail {
    events: Mutex<Vec<AuditEvent>>,
}

impl AuditTrail {
    /// Creates a new empty audit trail.
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written Vec behind.
    fn lock(&self) -> MutexGuard<'_, Vec<AuditEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns a snapshot of all recorded events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.lock().clone()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl AuditSink for AuditTrail {
    fn record(&self, event: AuditEvent) {
        self.lock().push(event);
    }
}

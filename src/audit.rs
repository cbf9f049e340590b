//! Audit records for authorization decisions.
//!
//! This module provides:
//! - `AuditEvent`: One record per scope check
//! - `AuditSink`: Destination for audit events
//! - `AuditTrail`: Thread-safe in-memory sink
//! - `TracingSink`: Sink that emits events as structured log entries
//!
//! Audit events hold only identifiers and scope names. Claims beyond the
//! principal's label are never recorded.

mod event;
mod trail;

pub use event::{AuditEvent, AuditOutcome};
pub use trail::{AuditSink, AuditTrail, TracingSink};

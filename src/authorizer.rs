//! The scope check itself, plus a configured wrapper for request pipelines.

use std::fmt;
use std::sync::Arc;

use crate::audit::{AuditEvent, AuditSink};
use crate::config::AuthzConfig;
use crate::error::{ScopeError, ScopeErrorKind};
use crate::logging::DecisionLog;
use crate::request::{Principal, RequestMeta};
use crate::scope::ScopeSet;

/// Checks that `principal` holds at least one of the `required` scopes.
///
/// Checks run in a fixed order and the first failure wins:
///
/// 1. `required` is empty: `InvalidArgument`
/// 2. `principal` is `None`: `PreconditionFailed`
/// 3. the scope claim is not a string: `InvalidState`
/// 4. no granted token equals a required scope: `Forbidden`
///
/// The check is pure; calling it twice with the same inputs gives the same
/// result.
///
/// # Examples
///
/// ```
/// use scope_authz::{authorize, Principal, ScopeErrorKind};
///
/// let user = Principal::new("user manager");
/// assert!(authorize(&["user"], Some(&user)).is_ok());
///
/// let err = authorize(&["admin"], Some(&user)).unwrap_err();
/// assert_eq!(err.kind(), ScopeErrorKind::Forbidden);
/// assert_eq!(err.to_string(), "Insufficient scope");
/// ```
pub fn authorize<S: AsRef<str>>(
    required: &[S],
    principal: Option<&Principal>,
) -> Result<(), ScopeError> {
    if required.is_empty() {
        return Err(ScopeErrorKind::InvalidArgument.into());
    }

    let principal = principal.ok_or(ScopeErrorKind::PreconditionFailed)?;

    let raw = principal
        .scope
        .as_str()
        .ok_or(ScopeErrorKind::InvalidState)?;

    if !ScopeSet::parse(raw).intersects(required) {
        return Err(ScopeErrorKind::Forbidden.into());
    }

    Ok(())
}

/// Completion-signal form of [`authorize`].
///
/// `done` is called exactly once, before this function returns, with the
/// result of the check. Suited to pre-handler hooks that sequence steps
/// through callbacks.
///
/// # Examples
///
/// ```
/// use scope_authz::{jwt_authz, Principal};
///
/// let user = Principal::new("baz");
/// let mut message = None;
///
/// jwt_authz(&["foo"], Some(&user), |result| {
///     message = result.err().map(|e| e.to_string());
/// });
///
/// assert_eq!(message.as_deref(), Some("Insufficient scope"));
/// ```
pub fn jwt_authz<S, F>(required: &[S], principal: Option<&Principal>, done: F)
where
    S: AsRef<str>,
    F: FnOnce(Result<(), ScopeError>),
{
    done(authorize(required, principal));
}

/// A configured scope checker for request pipelines.
///
/// Wraps [`authorize`] with decision logging and optional auditing. Cheap to
/// share behind an `Arc` between handlers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use scope_authz::{AuthzConfig, Principal, RequestMeta, ScopeAuthorizer};
/// use scope_authz::audit::AuditTrail;
///
/// let trail = Arc::new(AuditTrail::new());
/// let config = AuthzConfig { audit: true, ..AuthzConfig::default() };
/// let authorizer = ScopeAuthorizer::new(config).with_audit_sink(trail.clone());
///
/// let meta = RequestMeta::new("req-1").with_principal(Principal::new("read"));
/// assert!(authorizer.check(&meta, &["read"]).is_ok());
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct ScopeAuthorizer {
    config: AuthzConfig,
    sink: Option<Arc<dyn AuditSink>>,
}

impl ScopeAuthorizer {
    /// Creates an authorizer with the given configuration and no audit sink.
    pub fn new(config: AuthzConfig) -> Self {
        Self { config, sink: None }
    }

    /// Sets the audit sink. Events are only recorded when `config.audit`
    /// is enabled.
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AuthzConfig {
        &self.config
    }

    /// Checks the principal attached to `meta` against `required`.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, as described on [`authorize`].
    pub fn check<S: AsRef<str>>(
        &self,
        meta: &RequestMeta,
        required: &[S],
    ) -> Result<(), ScopeError> {
        let principal = meta.principal.as_ref();
        let result = authorize(required, principal);

        let required_owned: Vec<String> =
            required.iter().map(|s| s.as_ref().to_owned()).collect();
        let log = DecisionLog::new(&meta.request_id, &required_owned);
        match &result {
            Ok(()) => {
                let granted = principal
                    .and_then(|p| p.scope.as_str())
                    .map(ScopeSet::parse)
                    .unwrap_or_default();
                log.granted(self.config.log_granted, &granted.matching(required));
            }
            Err(e) => log.failed(e, principal.map(|p| p.scope.type_name())),
        }

        if self.config.audit {
            if let Some(sink) = &self.sink {
                sink.record(AuditEvent::new(
                    meta.request_id.as_str(),
                    principal.and_then(Principal::label),
                    required,
                    &result,
                ));
            }
        }

        result
    }

    /// Completion-signal form of [`check`](Self::check).
    pub fn check_with<S, F>(&self, meta: &RequestMeta, required: &[S], done: F)
    where
        S: AsRef<str>,
        F: FnOnce(Result<(), ScopeError>),
    {
        done(self.check(meta, required));
    }
}

impl fmt::Debug for ScopeAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeAuthorizer")
            .field("config", &self.config)
            .field("audit_sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditOutcome, AuditTrail};
    use crate::logging::tests::capture;
    use crate::request::ScopeClaim;
    use serde_json::json;

    const NONE: &[&str] = &[];

    fn kind_of(result: Result<(), ScopeError>) -> ScopeErrorKind {
        result.expect_err("check should fail").kind()
    }

    #[test]
    fn empty_required_fails_first() {
        assert_eq!(kind_of(authorize(NONE, None)), ScopeErrorKind::InvalidArgument);

        let bad = Principal {
            scope: ScopeClaim::Other(json!(123)),
            ..Principal::default()
        };
        assert_eq!(
            kind_of(authorize(NONE, Some(&bad))),
            ScopeErrorKind::InvalidArgument
        );
    }

    #[test]
    fn missing_principal() {
        let err = authorize(&["baz"], None).unwrap_err();
        assert_eq!(err.kind(), ScopeErrorKind::PreconditionFailed);
        assert_eq!(err.to_string(), "request.user does not exist");
    }

    #[test]
    fn non_string_scope() {
        for value in [json!(123), json!(null), json!(true), json!(["a"]), json!({})] {
            let principal = Principal {
                name: Some("sample".to_string()),
                scope: ScopeClaim::Other(value),
                ..Principal::default()
            };
            let err = authorize(&["baz"], Some(&principal)).unwrap_err();
            assert_eq!(err.to_string(), "request.user.scope must be a string");
        }
    }

    #[test]
    fn insufficient_scope() {
        let principal = Principal::new("baz").with_name("sample");
        let err = authorize(&["foo"], Some(&principal)).unwrap_err();
        assert_eq!(err.kind(), ScopeErrorKind::Forbidden);
        assert_eq!(err.to_string(), "Insufficient scope");
    }

    #[test]
    fn token_level_match() {
        let principal = Principal::new("user manager").with_name("sample");
        assert!(authorize(&["user"], Some(&principal)).is_ok());
    }

    #[test]
    fn any_required_scope_suffices() {
        let principal = Principal::new("read");
        assert!(authorize(&["admin", "read"], Some(&principal)).is_ok());
    }

    #[test]
    fn substring_does_not_match() {
        let principal = Principal::new("users");
        assert!(authorize(&["user"], Some(&principal)).is_err());
    }

    #[test]
    fn empty_scope_string_is_forbidden() {
        let principal = Principal::new("");
        assert_eq!(
            kind_of(authorize(&["read"], Some(&principal))),
            ScopeErrorKind::Forbidden
        );
    }

    #[test]
    fn accepts_owned_strings() {
        let required = vec!["read".to_string()];
        let principal = Principal::new("read");
        assert!(authorize(&required, Some(&principal)).is_ok());
    }

    #[test]
    fn jwt_authz_calls_done_once() {
        let principal = Principal::new("user manager");
        let mut calls = 0;
        let mut outcome = None;

        jwt_authz(&["user"], Some(&principal), |result| {
            calls += 1;
            outcome = Some(result);
        });

        assert_eq!(calls, 1);
        assert_eq!(outcome, Some(Ok(())));
    }

    #[test]
    fn jwt_authz_reports_errors_through_done() {
        let mut outcome = None;
        jwt_authz(NONE, None, |result| outcome = Some(result));
        assert_eq!(
            outcome.map(|r| r.map_err(|e| e.kind())),
            Some(Err(ScopeErrorKind::InvalidArgument))
        );
    }

    #[test]
    fn authorizer_records_audit_when_enabled() {
        let trail = Arc::new(AuditTrail::new());
        let config = AuthzConfig {
            audit: true,
            ..AuthzConfig::default()
        };
        let authorizer = ScopeAuthorizer::new(config).with_audit_sink(trail.clone());

        let meta = RequestMeta::new("req-audit")
            .with_principal(Principal::new("baz").with_id("user-1"));
        let result = authorizer.check(&meta, &["foo"]);

        assert!(result.is_err());
        let events = trail.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].request_id(), "req-audit");
        assert_eq!(events[0].principal(), Some("user-1"));
        assert_eq!(events[0].outcome(), AuditOutcome::Denied);
        assert_eq!(events[0].reason(), Some(ScopeErrorKind::Forbidden));
    }

    #[test]
    fn authorizer_skips_audit_when_disabled() {
        let trail = Arc::new(AuditTrail::new());
        let authorizer =
            ScopeAuthorizer::new(AuthzConfig::default()).with_audit_sink(trail.clone());

        let meta = RequestMeta::new("req-1").with_principal(Principal::new("read"));
        authorizer.check(&meta, &["read"]).unwrap();

        assert!(trail.is_empty());
    }

    #[test]
    fn authorizer_matches_plain_authorize() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let authorizer = ScopeAuthorizer::new(AuthzConfig {
            log_granted: true,
            ..AuthzConfig::default()
        });

        let with_user = RequestMeta::new("req-1").with_principal(Principal::new("a b"));
        let without_user = RequestMeta::new("req-2");

        assert_eq!(
            authorizer.check(&with_user, &["b"]),
            authorize(&["b"], with_user.principal.as_ref())
        );
        assert_eq!(
            authorizer.check(&without_user, &["b"]),
            authorize(&["b"], None)
        );
    }

    #[test]
    fn check_logs_matched_scopes_and_claim_type() {
        let authorizer = ScopeAuthorizer::new(AuthzConfig {
            log_granted: true,
            ..AuthzConfig::default()
        });
        let granted = RequestMeta::new("req-ok").with_principal(Principal::new("a c"));
        let numeric = RequestMeta::new("req-num").with_principal(Principal {
            scope: ScopeClaim::Other(json!(123)),
            ..Principal::default()
        });

        let events = capture(|| {
            authorizer.check(&granted, &["c", "b", "a"]).unwrap();
            authorizer.check(&numeric, &["a"]).unwrap_err();
        });

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["request_id"], "req-ok");
        assert_eq!(events[0]["matched"], r#"["c", "a"]"#);
        assert_eq!(events[1]["request_id"], "req-num");
        assert_eq!(events[1]["kind"], "invalid_state");
        assert_eq!(events[1]["scope_type"], "number");
    }

    #[test]
    fn check_with_uses_completion_signal() {
        let authorizer = ScopeAuthorizer::default();
        let meta = RequestMeta::new("req-cb");
        let mut message = String::new();

        authorizer.check_with(&meta, &["read"], |result| {
            if let Err(e) = result {
                message = e.to_string();
            }
        });

        assert_eq!(message, "request.user does not exist");
    }

    #[test]
    fn authorizer_debug_hides_sink() {
        let authorizer =
            ScopeAuthorizer::default().with_audit_sink(Arc::new(AuditTrail::new()));
        let debug = format!("{:?}", authorizer);
        assert!(debug.contains("audit_sink: true"));
    }
}

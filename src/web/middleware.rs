//! Pre-handler hooks that run the scope check before a route handler.

use std::sync::Arc;

use crate::authorizer::ScopeAuthorizer;

use super::{ErrorResponse, ExtractMetadata};

/// Runs the scope check for `request` and maps a failure to a response.
///
/// The status code follows the authorizer's configured `StatusMode`.
///
/// # Errors
///
/// Returns the `ErrorResponse` the framework should send instead of
/// calling the route handler.
///
/// # Examples
///
/// ```
/// use scope_authz::web::{pre_handler, RequestAdapter};
/// use scope_authz::{AuthzConfig, Principal, ScopeAuthorizer, StatusMode};
///
/// let authorizer = ScopeAuthorizer::new(AuthzConfig {
///     status_mode: StatusMode::Semantic,
///     ..AuthzConfig::default()
/// });
///
/// let mut request = RequestAdapter::new("req-1");
/// request.set_user(Some(Principal::new("baz")));
///
/// let response = pre_handler(&authorizer, &request, &["foo"]).unwrap_err();
/// assert_eq!(response.status_code, 403);
/// assert_eq!(response.message, "Insufficient scope");
/// ```
pub fn pre_handler<R, S>(
    authorizer: &ScopeAuthorizer,
    request: &R,
    required: &[S],
) -> Result<(), ErrorResponse>
where
    R: ExtractMetadata + ?Sized,
    S: AsRef<str>,
{
    let meta = request.extract_metadata();
    authorizer
        .check(&meta, required)
        .map_err(|e| ErrorResponse::from_error(&e, authorizer.config().status_mode))
}

/// A route's scope requirement bound to a shared authorizer.
///
/// Built once per route at registration time and run for every request.
#[derive(Debug, Clone)]
pub struct ScopeGuard {
    authorizer: Arc<ScopeAuthorizer>,
    required: Vec<String>,
}

impl ScopeGuard {
    /// Creates a guard requiring any one of `required`.
    ///
    /// An empty list is accepted here and reported on every run, the same
    /// as a direct check with no scopes.
    pub fn new<I, S>(authorizer: Arc<ScopeAuthorizer>, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authorizer,
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the required scopes.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Runs the check for one request.
    ///
    /// # Errors
    ///
    /// Returns the response to send when the check fails.
    pub fn run<R: ExtractMetadata + ?Sized>(&self, request: &R) -> Result<(), ErrorResponse> {
        pre_handler(&self.authorizer, request, &self.required)
    }
}

//! Owned request stand-in for framework integrations.

use serde_json::Value;

use crate::authorizer::jwt_authz;
use crate::error::{Error, ScopeError};
use crate::request::{Principal, RequestMeta};

use super::ExtractMetadata;

/// A request with an optional authenticated user attached.
///
/// Framework glue builds one of these per request (or implements
/// [`ExtractMetadata`] on its own type instead). Upstream authentication
/// fills in the user; the scope check only reads it.
///
/// # Examples
///
/// ```
/// use scope_authz::web::RequestAdapter;
/// use serde_json::json;
///
/// let mut request = RequestAdapter::new("req-12345");
/// request
///     .set_user_claims(json!({ "name": "sample", "scope": "user manager" }))
///     .unwrap();
///
/// let mut passed = false;
/// request.jwt_authz(&["user"], |result| passed = result.is_ok());
/// assert!(passed);
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    request_id: String,
    user: Option<Principal>,
}

impl RequestAdapter {
    /// Creates a request with no user attached.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            user: None,
        }
    }

    /// Sets or clears the authenticated user.
    pub fn set_user(&mut self, user: Option<Principal>) {
        self.user = user;
    }

    /// Attaches a user from a verified claims object.
    ///
    /// # Errors
    ///
    /// Returns `Error::Claims` if `claims` is not a JSON object. The current
    /// user is left unchanged.
    pub fn set_user_claims(&mut self, claims: Value) -> Result<(), Error> {
        self.user = Some(Principal::from_claims(claims)?);
        Ok(())
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the authenticated user, if present.
    pub fn user(&self) -> Option<&Principal> {
        self.user.as_ref()
    }

    /// Checks this request's user against `required` and reports the
    /// result through `done`, exactly once.
    pub fn jwt_authz<S, F>(&self, required: &[S], done: F)
    where
        S: AsRef<str>,
        F: FnOnce(Result<(), ScopeError>),
    {
        jwt_authz(required, self.user.as_ref(), done);
    }
}

impl ExtractMetadata for RequestAdapter {
    fn extract_metadata(&self) -> RequestMeta {
        RequestMeta {
            request_id: self.request_id.clone(),
            principal: self.user.clone(),
        }
    }
}

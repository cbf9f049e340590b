//! Extraction boundary trait for web integration.

use crate::request::RequestMeta;

/// Extracts request metadata from a framework-specific request.
///
/// Framework integrations implement this to hand the authorizer:
/// - a request ID for log and audit correlation
/// - the principal attached by upstream authentication, if any
///
/// Implementations only map types. They never verify tokens or decide
/// access.
///
/// # Examples
///
/// ```
/// use scope_authz::web::ExtractMetadata;
/// use scope_authz::{Principal, RequestMeta};
///
/// // Example framework-specific request
/// struct MyFrameworkRequest {
///     id: u64,
///     user: Option<Principal>,
/// }
///
/// impl ExtractMetadata for MyFrameworkRequest {
///     fn extract_metadata(&self) -> RequestMeta {
///         RequestMeta {
///             request_id: format!("req-{}", self.id),
///             principal: self.user.clone(),
///         }
///     }
/// }
/// ```
pub trait ExtractMetadata {
    /// Extracts request metadata for the scope check.
    fn extract_metadata(&self) -> RequestMeta;
}

impl ExtractMetadata for RequestMeta {
    fn extract_metadata(&self) -> RequestMeta {
        self.clone()
    }
}

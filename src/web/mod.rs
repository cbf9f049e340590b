//! Framework-agnostic web boundary.
//!
//! Framework glue maps its own request type to [`RequestMeta`] by
//! implementing [`ExtractMetadata`], runs a [`ScopeGuard`] before the route
//! handler, and turns a failure into a response from the returned
//! [`ErrorResponse`]. This module contains no framework or transport code.
//!
//! # Integration Flow
//!
//! ```text
//! HTTP request
//!   ↓
//! upstream authentication attaches a Principal (out of scope here)
//!   ↓
//! framework request --ExtractMetadata--> RequestMeta
//!   ↓
//! ScopeGuard::run / pre_handler
//!   ↓
//! Ok(())            → route handler runs
//! Err(ErrorResponse) → framework writes status + JSON body
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use scope_authz::web::{RequestAdapter, ScopeGuard};
//! use scope_authz::{Principal, ScopeAuthorizer};
//!
//! let guard = ScopeGuard::new(Arc::new(ScopeAuthorizer::default()), ["user"]);
//!
//! let mut request = RequestAdapter::new("req-1");
//! request.set_user(Some(Principal::new("user manager")));
//! assert!(guard.run(&request).is_ok());
//!
//! let anonymous = RequestAdapter::new("req-2");
//! let response = guard.run(&anonymous).unwrap_err();
//! assert_eq!(response.status_code, 500);
//! assert_eq!(response.message, "request.user does not exist");
//! ```
//!
//! [`RequestMeta`]: crate::RequestMeta

mod adapter;
mod extract;
mod middleware;
mod response;

pub use adapter::RequestAdapter;
pub use extract::ExtractMetadata;
pub use middleware::{pre_handler, ScopeGuard};
pub use response::ErrorResponse;

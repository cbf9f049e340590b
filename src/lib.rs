//! Scope-based authorization for authenticated web requests.
//!
//! Upstream authentication verifies a token and attaches a [`Principal`]
//! whose `scope` claim is a space-separated list of granted scopes. This
//! crate decides whether that principal may reach a route that requires one
//! of a given list of scopes, and reports one of four fixed errors when it
//! may not.
//!
//! # Core Types
//!
//! - [`authorize`]: The check itself, a pure function
//! - [`jwt_authz`]: The same check reported through a completion callback
//! - [`ScopeAuthorizer`]: Configured checker with decision logging and auditing
//! - [`ScopeGate`]: Builder for chaining required scopes
//! - [`ScopeError`]: Failure with a stable, matchable message
//! - [`web`]: Framework-agnostic pre-handler boundary
//!
//! # Examples
//!
//! ```
//! use scope_authz::{authorize, Principal, ScopeErrorKind};
//!
//! let user = Principal::new("user manager");
//! assert!(authorize(&["user"], Some(&user)).is_ok());
//!
//! let err = authorize(&["user"], None).unwrap_err();
//! assert_eq!(err.kind(), ScopeErrorKind::PreconditionFailed);
//! assert_eq!(err.to_string(), "request.user does not exist");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod authorizer;
mod config;
mod error;
mod gate;
mod logging;
mod request;
mod scope;
pub mod web;

pub use authorizer::{authorize, jwt_authz, ScopeAuthorizer};
pub use config::{AuthzConfig, StatusMode};
pub use error::{Error, ScopeError, ScopeErrorKind};
pub use gate::ScopeGate;
pub use request::{Principal, RequestMeta, ScopeClaim};
pub use scope::ScopeSet;

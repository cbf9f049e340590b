//! Authorizer configuration.
//!
//! Every field is optional in TOML; missing fields take their defaults.
//!
//! ```
//! use scope_authz::{AuthzConfig, StatusMode};
//!
//! let config = AuthzConfig::from_toml_str(
//!     r#"
//! status_mode = "semantic"
//! audit = true
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.status_mode, StatusMode::Semantic);
//! assert!(config.audit);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ScopeErrorKind};

/// How failed checks map to HTTP status codes at the web boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMode {
    /// Every failure is a 500, as plain errors are in most frameworks.
    #[default]
    Uniform,
    /// Missing principal is 401, insufficient scope is 403, the rest 500.
    Semantic,
}

impl StatusMode {
    /// Returns the status code for a failure of `kind`.
    pub fn status_for(self, kind: ScopeErrorKind) -> u16 {
        match self {
            StatusMode::Uniform => 500,
            StatusMode::Semantic => match kind {
                ScopeErrorKind::PreconditionFailed => 401,
                ScopeErrorKind::Forbidden => 403,
                ScopeErrorKind::InvalidArgument | ScopeErrorKind::InvalidState => 500,
            },
        }
    }
}

/// Configuration for a [`ScopeAuthorizer`](crate::ScopeAuthorizer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthzConfig {
    /// Status code mapping used by the web boundary
    pub status_mode: StatusMode,
    /// Record an audit event for every decision
    pub audit: bool,
    /// Log granted decisions at info instead of debug
    pub log_granted: bool,
}

impl AuthzConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the TOML is malformed or a field has an
    /// unknown value.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        toml::from_str(s).map_err(|e| Error::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }
}

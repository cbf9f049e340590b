use std::fmt;

/// Errors that can occur in the scope-authz crate.
#[derive(Debug)]
pub enum Error {
    /// A scope check failed
    Scope(ScopeError),
    /// Configuration could not be read or parsed
    Config(String),
    /// A claims object could not be mapped to a principal
    Claims(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Scope(e) => write!(f, "Scope check failed: {}", e),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Claims(msg) => write!(f, "Invalid claims: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Scope(e) => Some(e),
            Error::Config(_) | Error::Claims(_) => None,
        }
    }
}

impl From<ScopeError> for Error {
    fn from(e: ScopeError) -> Self {
        Error::Scope(e)
    }
}

/// A failed scope check.
///
/// The `Display` output is exactly the fixed message of the error kind.
/// Callers match on these strings, so they never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeError {
    kind: ScopeErrorKind,
}

impl ScopeError {
    /// Creates a new error of the given kind.
    pub fn new(kind: ScopeErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the kind of failure.
    pub fn kind(&self) -> ScopeErrorKind {
        self.kind
    }

    /// Returns the fixed, human-readable message for this error.
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl From<ScopeErrorKind> for ScopeError {
    fn from(kind: ScopeErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ScopeError {}

/// The kind of scope check failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeErrorKind {
    /// The required scope list was empty
    InvalidArgument,
    /// No principal is attached to the request
    PreconditionFailed,
    /// The principal's scope claim is not a string
    InvalidState,
    /// The principal holds none of the required scopes
    Forbidden,
}

impl ScopeErrorKind {
    /// Returns the fixed message associated with this kind.
    pub fn message(self) -> &'static str {
        match self {
            ScopeErrorKind::InvalidArgument => "Scopes cannot be empty",
            ScopeErrorKind::PreconditionFailed => "request.user does not exist",
            ScopeErrorKind::InvalidState => "request.user.scope must be a string",
            ScopeErrorKind::Forbidden => "Insufficient scope",
        }
    }

    /// Returns a stable snake_case label, used in logs and audit events.
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeErrorKind::InvalidArgument => "invalid_argument",
            ScopeErrorKind::PreconditionFailed => "precondition_failed",
            ScopeErrorKind::InvalidState => "invalid_state",
            ScopeErrorKind::Forbidden => "forbidden",
        }
    }
}

impl fmt::Display for ScopeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

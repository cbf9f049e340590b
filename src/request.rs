use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Metadata about an incoming request.
///
/// Contains the request identifier and the principal attached by upstream
/// authentication, if any.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Unique identifier for this request
    pub request_id: String,
    /// Authenticated principal, if any
    pub principal: Option<Principal>,
}

impl RequestMeta {
    /// Creates request metadata without a principal.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            principal: None,
        }
    }

    /// Attaches a principal, replacing any previous one.
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }
}

/// An authenticated user or service principal.
///
/// Deserializes from a decoded token claims object. The `sub` claim becomes
/// `id`; unknown claims are ignored. Numeric `sub` and `name` claims are kept
/// as text and any other non-string value is dropped, so an odd identity
/// claim never discards the principal. A missing `scope` claim is kept as
/// `ScopeClaim::Other(Value::Null)` so that it fails the string check
/// instead of silently granting nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Principal {
    /// Subject identifier
    #[serde(
        default,
        rename = "sub",
        deserialize_with = "identity_claim",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Display name
    #[serde(
        default,
        deserialize_with = "identity_claim",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Raw scope claim
    #[serde(default)]
    pub scope: ScopeClaim,
}

impl Principal {
    /// Creates a principal holding the given space-separated scope string.
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            scope: ScopeClaim::Text(scope.into()),
        }
    }

    /// Sets the subject identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds a principal from an already verified claims object.
    ///
    /// # Errors
    ///
    /// Returns `Error::Claims` if `claims` is not a JSON object.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_authz::{Principal, ScopeClaim};
    /// use serde_json::json;
    ///
    /// let principal = Principal::from_claims(json!({
    ///     "sub": "user-1",
    ///     "scope": "read write",
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(principal.id.as_deref(), Some("user-1"));
    /// assert_eq!(principal.scope, ScopeClaim::Text("read write".to_string()));
    /// ```
    pub fn from_claims(claims: Value) -> Result<Self, Error> {
        if !claims.is_object() {
            return Err(Error::Claims(format!(
                "expected a claims object, found {}",
                json_type(&claims)
            )));
        }
        serde_json::from_value(claims).map_err(|e| Error::Claims(e.to_string()))
    }

    /// Returns a label identifying this principal in logs and audit events.
    pub fn label(&self) -> Option<&str> {
        self.id.as_deref().or(self.name.as_deref())
    }
}

fn identity_claim<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The raw `scope` claim of a principal.
///
/// Tokens arrive from a dynamically typed claims object, so the claim may
/// hold any JSON value. Only `Text` can grant scopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeClaim {
    /// A space-separated scope string
    Text(String),
    /// Any non-string value, including a missing claim (`null`)
    Other(Value),
}

impl ScopeClaim {
    /// Returns the scope string if the claim is string-typed.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScopeClaim::Text(s) | ScopeClaim::Other(Value::String(s)) => Some(s),
            ScopeClaim::Other(_) => None,
        }
    }

    /// Returns the JSON type name of the claim.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScopeClaim::Text(_) => "string",
            ScopeClaim::Other(value) => json_type(value),
        }
    }
}

impl Default for ScopeClaim {
    fn default() -> Self {
        ScopeClaim::Other(Value::Null)
    }
}

impl From<&str> for ScopeClaim {
    fn from(s: &str) -> Self {
        ScopeClaim::Text(s.to_string())
    }
}

impl From<String> for ScopeClaim {
    fn from(s: String) -> Self {
        ScopeClaim::Text(s)
    }
}

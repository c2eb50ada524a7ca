//! # Hydrator Errors
//!
//! Two layers of errors live here:
//!
//! - [`FieldError`] is what a single [`Resource`](crate::Resource) reports when a field
//!   cannot be read or written. It knows nothing about type identities.
//! - [`HydratorError`] is what the engine returns to callers. It wraps field errors with
//!   the identity and field name that produced them.

use crate::identity::TypeIdentity;
use serde_json::Value;

/// Result alias used across the engine.
pub type HydratorResult<T> = Result<T, HydratorError>;

/// Errors raised by a resource while reading or writing one of its declared fields.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("value does not fit the declared type: {0}")]
    Convert(#[source] serde_json::Error),
    #[error("expected a {expected} value")]
    Shape { expected: &'static str },
    #[error("expected resource {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("setter rejected its argument: {0}")]
    Setter(String),
}

/// Errors surfaced by hydration, extraction and the transport back-reference.
#[derive(Debug, thiserror::Error)]
pub enum HydratorError {
    #[error("Unknown resource type: {0}")]
    UnknownType(TypeIdentity),

    #[error("Invalid schema for {identity}: {reason}")]
    InvalidSchema {
        identity: TypeIdentity,
        reason: String,
    },

    #[error("Missing field `{field}` on {identity}")]
    MissingField {
        identity: TypeIdentity,
        field: String,
    },

    #[error("Malformed field `{field}` on {identity}: expected {expected}, found {found}")]
    Malformed {
        identity: TypeIdentity,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Cannot hydrate {identity} from a JSON {found}")]
    NotAnObject {
        identity: TypeIdentity,
        found: &'static str,
    },

    #[error("Field `{field}` on {identity}: {source}")]
    Field {
        identity: TypeIdentity,
        field: String,
        #[source]
        source: FieldError,
    },

    #[error("Hydrated {found}, but {expected} was requested")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Transport was dropped while a resource still referenced it")]
    TransportGone,

    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HydratorError {
    pub(crate) fn field(
        identity: &TypeIdentity,
        field: impl Into<String>,
        source: FieldError,
    ) -> Self {
        Self::Field {
            identity: identity.clone(),
            field: field.into(),
            source,
        }
    }

    pub(crate) fn missing(identity: &TypeIdentity, field: impl Into<String>) -> Self {
        Self::MissingField {
            identity: identity.clone(),
            field: field.into(),
        }
    }

    pub(crate) fn malformed(
        identity: &TypeIdentity,
        field: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::Malformed {
            identity: identity.clone(),
            field: field.into(),
            expected,
            found,
        }
    }

    /// Wrap a collaborator failure (network, cache, decoding) as an opaque transport error.
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(source))
    }
}

/// Short JSON kind name used in error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_kind_names_every_variant() {
        let cases = [
            (json!(null), "null"),
            (json!(true), "boolean"),
            (json!(1), "number"),
            (json!("x"), "string"),
            (json!([]), "array"),
            (json!({}), "object"),
        ];

        for (value, kind) in cases {
            assert_eq!(json_kind(&value), kind);
        }
    }

    #[test]
    fn malformed_message_names_identity_and_field() {
        let identity = TypeIdentity::from("api::sync::Repository");
        let error = HydratorError::malformed(&identity, "subs", "array", "string");
        assert_eq!(
            error.to_string(),
            "Malformed field `subs` on api::sync::Repository: expected array, found string"
        );
    }
}

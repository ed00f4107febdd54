//! # Record Validation
//!
//! Checks one document's metadata mapping against a [`Schema`].
//!
//! Two sweeps run over every record, and both always run in full:
//!
//! 1. **Required sweep**: each required field missing from the metadata
//!    yields `MissingKey`, in schema declaration order.
//! 2. **Per-key sweep**: each metadata key, in the record's own order,
//!    goes through a short-circuiting chain and yields at most one
//!    violation:
//!
//! ```text
//! key == ""            ──▶ EmptyKey
//! key not in schema    ──▶ InvalidKey
//! value is null        ──▶ EmptyValue
//! type mismatch        ──▶ InvalidType   (allowed values not checked)
//! not an allowed value ──▶ InvalidValue  (numbers compare by value)
//! ```
//!
//! Output is the required-sweep violations followed by the per-key ones.
//! Validation is pure: the same schema and metadata always give the same
//! list.

use std::fmt;

use fmv_core::RuntimeKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::matcher::match_type;
use crate::schema::Schema;

/// A single non-conformance between a record and the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A required field is absent.
    MissingKey {
        /// Field name.
        field: String,
    },
    /// The metadata has a key that is the empty string.
    EmptyKey,
    /// The metadata has a key the schema does not declare.
    InvalidKey {
        /// Offending key.
        field: String,
    },
    /// A declared key has a null value.
    EmptyValue {
        /// Field name.
        field: String,
    },
    /// A value does not match the field's expected type.
    InvalidType {
        /// Field name.
        field: String,
        /// Canonical name of the expected type.
        expected: String,
        /// Runtime kind of the value found.
        actual: RuntimeKind,
    },
    /// A value is not one of the field's allowed values.
    InvalidValue {
        /// Field name.
        field: String,
        /// The allowed values, in schema order.
        allowed: Vec<Value>,
        /// The value found.
        actual: Value,
    },
}

impl Violation {
    /// The field this violation concerns; `None` for `EmptyKey`.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::EmptyKey => None,
            Self::MissingKey { field }
            | Self::InvalidKey { field }
            | Self::EmptyValue { field }
            | Self::InvalidType { field, .. }
            | Self::InvalidValue { field, .. } => Some(field.as_str()),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { field } => write!(f, "missing required key '{field}'"),
            Self::EmptyKey => f.write_str("empty key"),
            Self::InvalidKey { field } => write!(f, "key '{field}' is not declared in the schema"),
            Self::EmptyValue { field } => write!(f, "key '{field}' has no value"),
            Self::InvalidType {
                field,
                expected,
                actual,
            } => write!(f, "key '{field}' expected type {expected}, found {actual}"),
            Self::InvalidValue {
                field,
                allowed,
                actual,
            } => {
                let allowed = Value::Array(allowed.clone());
                write!(f, "key '{field}' expected one of {allowed}, found {actual}")
            }
        }
    }
}

/// Validate one metadata mapping against `schema`.
pub fn validate_record(schema: &Schema, metadata: &Map<String, Value>) -> Vec<Violation> {
    let mut violations: Vec<Violation> = schema
        .required_fields()
        .filter(|field| !metadata.contains_key(*field))
        .map(|field| Violation::MissingKey {
            field: field.to_string(),
        })
        .collect();

    violations.extend(
        metadata
            .iter()
            .filter_map(|(key, value)| check_key(schema, key, value)),
    );
    violations
}

fn check_key(schema: &Schema, key: &str, value: &Value) -> Option<Violation> {
    if key.is_empty() {
        return Some(Violation::EmptyKey);
    }
    let Some(spec) = schema.get(key) else {
        return Some(Violation::InvalidKey {
            field: key.to_string(),
        });
    };
    if value.is_null() {
        return Some(Violation::EmptyValue {
            field: key.to_string(),
        });
    }

    let matched = match_type(value, &spec.expected_type);
    if !matched.valid {
        return Some(Violation::InvalidType {
            field: key.to_string(),
            expected: matched.expected_type_name,
            actual: RuntimeKind::of(value),
        });
    }

    match &spec.allowed_values {
        Some(allowed) if !allowed.iter().any(|a| values_equal(a, value)) => {
            Some(Violation::InvalidValue {
            field: key.to_string(),
            allowed: allowed.clone(),
            actual: value.clone(),
            })
        }
        _ => None,
    }
}

/// Equality for allowed-value membership. Numbers compare by value, so
/// `1` and `1.0` are the same number.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        _ => a == b,
    }
}

//! # Type Matcher
//!
//! Decides whether a metadata value fits a [`TypeDescriptor`].
//!
//! Primitive descriptors compare the lower-cased canonical name against the
//! value's runtime kind. A structured value that misses the primitive
//! comparison gets a second chance through the structural check, which
//! asks whether the value belongs to the descriptor's class. Nominal
//! descriptors go straight to the structural check. Classes the matcher
//! does not know fail closed.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fmv_core::RuntimeKind;
use serde_json::Value;

use crate::schema::TypeDescriptor;

/// Result of matching a value against a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMatch {
    /// Whether the value fits.
    pub valid: bool,
    /// Canonical name of the expected type, empty if unresolved.
    pub expected_type_name: String,
}

/// Match `value` against `expected`.
pub fn match_type(value: &Value, expected: &TypeDescriptor) -> TypeMatch {
    let expected_type_name = expected.canonical_name().to_string();

    let valid = if expected.is_primitive() {
        let kind = RuntimeKind::of(value);
        if kind.name() == expected_type_name.to_ascii_lowercase() {
            true
        } else if kind.is_structured() {
            conforms_to(value, expected)
        } else {
            false
        }
    } else {
        conforms_to(value, expected)
    };

    TypeMatch {
        valid,
        expected_type_name,
    }
}

/// Structural class membership.
fn conforms_to(value: &Value, expected: &TypeDescriptor) -> bool {
    match expected {
        TypeDescriptor::Nominal(name) => match name.as_str() {
            "Array" => value.is_array(),
            "Object" => value.is_array() || value.is_object(),
            "Date" => value.as_str().is_some_and(is_date),
            _ => false,
        },
        // Containers are never members of a primitive class here: JSON has
        // no boxed strings, numbers or booleans.
        TypeDescriptor::Text
        | TypeDescriptor::Number
        | TypeDescriptor::Boolean
        | TypeDescriptor::Function
        | TypeDescriptor::Symbol
        | TypeDescriptor::Unresolved => false,
    }
}

/// RFC 3339 timestamps, `YYYY-MM-DD`, and `YYYY-MM-DD HH:MM:SS`.
fn is_date(s: &str) -> bool {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
}

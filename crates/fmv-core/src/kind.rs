//! # Runtime Value Kinds
//!
//! Names the runtime shape of a metadata value. The lower-case kind name is
//! what type violations report as the actual kind, and what primitive type
//! descriptors are compared against.
//!
//! `Array` and `Object` are the *structured* kinds. Everything else is a
//! bare primitive or null.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime kind of a `serde_json::Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    /// `null`, including keys written without a value.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any integer or finite float.
    Number,
    /// A string scalar.
    String,
    /// A sequence.
    Array,
    /// A mapping.
    Object,
}

impl RuntimeKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lower-case kind name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Whether the kind is a structured (container) value.
    pub fn is_structured(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

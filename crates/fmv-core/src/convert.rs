//! # YAML to JSON Value Conversion
//!
//! Frontmatter and schema files are written in YAML, but validation runs on
//! `serde_json::Value`. YAML has a richer type system (tags, non-string
//! keys, NaN); only the JSON-compatible subset survives conversion. Key
//! order is preserved.

use serde_json::{Map, Number, Value};

use crate::error::ConversionError;

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar mapping keys (strings, numbers, booleans) are stringified.
/// YAML tags are dropped and the tagged value is converted.
///
/// # Errors
///
/// Returns [`ConversionError`] for non-finite floats, non-scalar keys, and
/// keys that collide once stringified (`1` and `"1"`, `~` and `""`).
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, ConversionError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or(ConversionError::NonFiniteFloat(f))
            } else {
                Err(ConversionError::UnsupportedNumber(n.to_string()))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => String::new(),
                    other => return Err(ConversionError::UnsupportedKey(format!("{other:?}"))),
                };
                if json_map.contains_key(&key) {
                    return Err(ConversionError::DuplicateKey(key));
                }
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

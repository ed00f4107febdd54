//! # Schema Model
//!
//! A schema is an immutable mapping from field name to [`FieldSpec`].
//! Schemas are loaded from YAML or JSON:
//!
//! ```yaml
//! title:  { required: true, type: String }
//! layout: { type: String, allowed: [post, page] }
//! tags:   { type: Array }
//! ```
//!
//! Type names are resolved into a [`TypeDescriptor`] at load time. Nothing
//! is reflected or re-parsed while validating.
//!
//! ## Absent Schemas
//!
//! A `null` document or an empty mapping means "nothing to validate". The
//! loaders return `Ok(None)` for it so callers can short-circuit the run.

use std::collections::HashMap;
use std::fmt;

use fmv_core::{yaml_to_json_value, RuntimeKind};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Configuration error in a schema. Fatal to the validation run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The schema root is not a mapping.
    #[error("schema must be a mapping of field name to spec, found {found}")]
    NotAMapping {
        /// Runtime kind of the schema root.
        found: RuntimeKind,
    },

    /// A field's spec is not a mapping.
    #[error("spec for field '{field}' must be a mapping, found {found}")]
    SpecNotAMapping {
        /// Field name.
        field: String,
        /// Runtime kind of the spec.
        found: RuntimeKind,
    },

    /// A field's spec has the right shape but invalid content.
    #[error("invalid spec for field '{field}': {reason}")]
    InvalidSpec {
        /// Field name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The schema declares a field with an empty name.
    #[error("schema declares a field with an empty name")]
    EmptyFieldName,

    /// The schema source text is not valid YAML/JSON.
    #[error("schema could not be parsed: {0}")]
    Parse(String),
}

/// Expected type of a field, resolved from its schema type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// Text (`String`).
    Text,
    /// `Number`.
    Number,
    /// `Boolean`.
    Boolean,
    /// `Function`. No metadata value is ever function-like.
    Function,
    /// `Symbol`. No metadata value is ever symbol-like.
    Symbol,
    /// Any other named class, matched structurally.
    Nominal(String),
    /// No type name was given.
    Unresolved,
}

impl TypeDescriptor {
    /// Resolve a schema type name.
    ///
    /// Primitive names and the built-in classes (`Array`, `Object`, `Date`)
    /// are matched case-insensitively. Other names are kept as written.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Self::Unresolved,
            "string" | "text" => Self::Text,
            "number" => Self::Number,
            "boolean" | "bool" => Self::Boolean,
            "function" => Self::Function,
            "symbol" => Self::Symbol,
            "array" => Self::Nominal("Array".to_string()),
            "object" => Self::Nominal("Object".to_string()),
            "date" => Self::Nominal("Date".to_string()),
            _ => Self::Nominal(trimmed.to_string()),
        }
    }

    /// Canonical type name reported in violations. Empty when unresolved.
    pub fn canonical_name(&self) -> &str {
        match self {
            Self::Text => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Function => "Function",
            Self::Symbol => "Symbol",
            Self::Nominal(name) => name,
            Self::Unresolved => "",
        }
    }

    /// Whether this is one of the five primitive kinds.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Number | Self::Boolean | Self::Function | Self::Symbol
        )
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => f.write_str("<unresolved>"),
            other => f.write_str(other.canonical_name()),
        }
    }
}

/// Constraint descriptor for one schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Whether the field must be present in every record.
    pub required: bool,
    /// Expected type of the field's value.
    pub expected_type: TypeDescriptor,
    /// If set, the value must equal one of these.
    pub allowed_values: Option<Vec<Value>>,
}

impl FieldSpec {
    /// An optional field of the given type with no allowed-value set.
    pub fn new(expected_type: TypeDescriptor) -> Self {
        Self {
            required: false,
            expected_type,
            allowed_values: None,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restrict the field to the given values.
    pub fn allowed(mut self, values: Vec<Value>) -> Self {
        self.allowed_values = Some(values);
        self
    }
}

/// On-disk shape of a field spec.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFieldSpec {
    #[serde(default)]
    required: bool,
    #[serde(rename = "type", default)]
    type_name: Option<String>,
    #[serde(alias = "allowedValues", default)]
    allowed: Option<Vec<Value>>,
}

impl RawFieldSpec {
    fn resolve(self) -> FieldSpec {
        FieldSpec {
            required: self.required,
            expected_type: self
                .type_name
                .as_deref()
                .map_or(TypeDescriptor::Unresolved, TypeDescriptor::parse),
            allowed_values: self.allowed,
        }
    }
}

/// Immutable mapping from field name to [`FieldSpec`].
///
/// Field order is declaration order; it decides the order of missing-key
/// violations.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<(String, FieldSpec)>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from `(name, spec)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::EmptyFieldName` for an empty name and
    /// `SchemaError::InvalidSpec` if a name is declared twice.
    pub fn from_fields<I, S>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (S, FieldSpec)>,
        S: Into<String>,
    {
        let mut schema = Self {
            fields: Vec::new(),
            index: HashMap::new(),
        };
        for (name, spec) in fields {
            let name = name.into();
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if schema.index.contains_key(&name) {
                return Err(SchemaError::InvalidSpec {
                    field: name,
                    reason: "field is declared more than once".to_string(),
                });
            }
            schema.index.insert(name.clone(), schema.fields.len());
            schema.fields.push((name, spec));
        }
        Ok(schema)
    }

    /// Interpret a parsed schema value.
    ///
    /// Returns `Ok(None)` for `null` or an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] describing the first malformed part.
    pub fn from_value(value: &Value) -> Result<Option<Self>, SchemaError> {
        let map = match value {
            Value::Null => return Ok(None),
            Value::Object(map) => map,
            other => {
                return Err(SchemaError::NotAMapping {
                    found: RuntimeKind::of(other),
                })
            }
        };
        if map.is_empty() {
            return Ok(None);
        }

        let mut fields = Vec::with_capacity(map.len());
        for (name, raw) in map {
            if !raw.is_object() {
                return Err(SchemaError::SpecNotAMapping {
                    field: name.clone(),
                    found: RuntimeKind::of(raw),
                });
            }
            let spec: RawFieldSpec =
                serde_json::from_value(raw.clone()).map_err(|e| SchemaError::InvalidSpec {
                    field: name.clone(),
                    reason: e.to_string(),
                })?;
            fields.push((name.clone(), spec.resolve()));
        }
        Self::from_fields(fields).map(Some)
    }

    /// Parse schema source text (YAML, or JSON as a YAML subset).
    ///
    /// Duplicate field names are rejected by the YAML parser.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` for unparsable text, otherwise as
    /// [`Schema::from_value`].
    pub fn parse(source: &str) -> Result<Option<Self>, SchemaError> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(source).map_err(|e| SchemaError::Parse(e.to_string()))?;
        let value = yaml_to_json_value(&yaml).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Look up a field's spec.
    pub fn get(&self, field: &str) -> Option<&FieldSpec> {
        self.index.get(field).map(|&i| &self.fields[i].1)
    }

    /// Whether the schema declares `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Names of required fields, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, spec)| spec.required)
            .map(|(name, _)| name.as_str())
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no fields are declared.
    ///
    /// Only possible through [`Schema::from_fields`]; the loaders return
    /// `None` for empty sources instead.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_flat_schema() {
        let schema = Schema::from_value(&json!({
            "title": {"required": true, "type": "String"},
            "layout": {"type": "string", "allowed": ["post", "page"]},
            "tags": {"type": "Array"}
        }))
        .unwrap()
        .unwrap();

        assert_eq!(schema.len(), 3);
        let title = schema.get("title").unwrap();
        assert!(title.required);
        assert_eq!(title.expected_type, TypeDescriptor::Text);
        let layout = schema.get("layout").unwrap();
        assert!(!layout.required);
        assert_eq!(layout.allowed_values, Some(vec![json!("post"), json!("page")]));
        assert_eq!(
            schema.get("tags").unwrap().expected_type,
            TypeDescriptor::Nominal("Array".to_string())
        );
        assert!(schema.get("missing").is_none());
    }

    #[test]
    fn test_allowed_values_alias() {
        let schema = Schema::from_value(&json!({
            "tag": {"type": "String", "allowedValues": ["blog"]}
        }))
        .unwrap()
        .unwrap();
        assert_eq!(schema.get("tag").unwrap().allowed_values, Some(vec![json!("blog")]));
    }

    #[test]
    fn test_required_fields_in_declaration_order() {
        let schema = Schema::from_value(&json!({
            "b": {"required": true, "type": "String"},
            "x": {"type": "String"},
            "a": {"required": true, "type": "Number"}
        }))
        .unwrap()
        .unwrap();
        let required: Vec<&str> = schema.required_fields().collect();
        assert_eq!(required, vec!["b", "a"]);
    }

    #[test]
    fn test_absent_schema_is_none() {
        assert!(Schema::from_value(&Value::Null).unwrap().is_none());
        assert!(Schema::from_value(&json!({})).unwrap().is_none());
        assert!(Schema::parse("~\n").unwrap().is_none());
    }

    #[test]
    fn test_empty_field_list_builds_empty_schema() {
        let schema = Schema::from_fields(Vec::<(String, FieldSpec)>::new()).unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.required_fields().count(), 0);

        let loaded = Schema::parse("title: {type: String}\n").unwrap().unwrap();
        assert!(!loaded.is_empty());
    }

    #[test]
    fn test_non_mapping_root_rejected() {
        let err = Schema::from_value(&json!(["title"])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NotAMapping {
                found: RuntimeKind::Array
            }
        );
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn test_non_mapping_spec_rejected() {
        let err = Schema::from_value(&json!({"title": "String"})).unwrap_err();
        assert!(matches!(err, SchemaError::SpecNotAMapping { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_unknown_spec_key_rejected() {
        let err = Schema::from_value(&json!({"title": {"type": "String", "requried": true}}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSpec { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_wrong_required_type_rejected() {
        let err = Schema::from_value(&json!({"title": {"required": "yes"}})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSpec { .. }));
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let err = Schema::from_value(&json!({"": {"type": "String"}})).unwrap_err();
        assert_eq!(err, SchemaError::EmptyFieldName);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Schema::from_fields([
            ("title", FieldSpec::new(TypeDescriptor::Text)),
            ("title", FieldSpec::new(TypeDescriptor::Number)),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSpec { .. }));
    }

    #[test]
    fn test_duplicate_yaml_key_rejected() {
        let err = Schema::parse("title: {type: String}\ntitle: {type: Number}\n").unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
    }

    #[test]
    fn test_missing_type_is_unresolved() {
        let schema = Schema::parse("title: {required: true}\n").unwrap().unwrap();
        let spec = schema.get("title").unwrap();
        assert_eq!(spec.expected_type, TypeDescriptor::Unresolved);
        assert_eq!(spec.expected_type.canonical_name(), "");
    }

    #[test]
    fn test_type_name_resolution() {
        assert_eq!(TypeDescriptor::parse("text"), TypeDescriptor::Text);
        assert_eq!(TypeDescriptor::parse("Boolean"), TypeDescriptor::Boolean);
        assert_eq!(TypeDescriptor::parse("bool"), TypeDescriptor::Boolean);
        assert_eq!(TypeDescriptor::parse("symbol"), TypeDescriptor::Symbol);
        assert_eq!(
            TypeDescriptor::parse("date"),
            TypeDescriptor::Nominal("Date".to_string())
        );
        assert_eq!(
            TypeDescriptor::parse("Author"),
            TypeDescriptor::Nominal("Author".to_string())
        );
        assert_eq!(TypeDescriptor::parse("  "), TypeDescriptor::Unresolved);
        assert!(TypeDescriptor::Function.is_primitive());
        assert!(!TypeDescriptor::parse("Array").is_primitive());
    }

    #[test]
    fn test_builder_constructors() {
        let spec = FieldSpec::new(TypeDescriptor::Text)
            .required()
            .allowed(vec![json!("a")]);
        assert!(spec.required);
        assert_eq!(spec.allowed_values.as_deref(), Some(&[json!("a")][..]));
    }
}

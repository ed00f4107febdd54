//! # fmv-schema: Frontmatter Schema & Record Validation
//!
//! Interprets a flat schema (`field → spec`) and checks one document's
//! metadata against it.
//!
//! ## Schema (`schema`)
//!
//! [`Schema`] maps field names to [`FieldSpec`]s: a required flag, a
//! [`TypeDescriptor`] resolved once at load time, and an optional set of
//! allowed values. Malformed schemas are rejected with [`SchemaError`]
//! before any document is looked at.
//!
//! ## Type Matching (`matcher`)
//!
//! [`match_type`] decides whether a value fits a descriptor: runtime kind
//! comparison for primitive descriptors, structural membership for named
//! classes (`Array`, `Object`, `Date`). Unknown classes fail closed.
//!
//! ## Record Validation (`validate`)
//!
//! [`validate_record`] runs the required-field sweep followed by the
//! per-key sweep and returns every [`Violation`] found, in detection order.
//! It never fails: violations are data.

pub mod matcher;
pub mod schema;
pub mod validate;

pub use matcher::{match_type, TypeMatch};
pub use schema::{FieldSpec, Schema, SchemaError, TypeDescriptor};
pub use validate::{validate_record, Violation};

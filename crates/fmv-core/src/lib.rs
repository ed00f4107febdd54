//! # fmv-core: Foundational Types for fmv
//!
//! This crate is the leaf of the fmv workspace. It defines the small set of
//! primitives every other crate agrees on: how a document is identified,
//! how a metadata value's runtime kind is named, and how YAML frontmatter is
//! brought into the `serde_json::Value` model the validator works on.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype for document identity.** `DocumentId` wraps the path-like
//!    identity string. Collectors and reports are keyed by it, never by a
//!    bare `String`.
//!
//! 2. **One value model.** All metadata is `serde_json::Value` with key order
//!    preserved. YAML enters through [`yaml_to_json_value`] and nowhere else.
//!
//! 3. **Closed runtime kind set.** `RuntimeKind` has one variant per JSON
//!    value shape; `match` on it is exhaustive everywhere.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fmv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod convert;
pub mod error;
pub mod identity;
pub mod kind;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use convert::yaml_to_json_value;
pub use error::{ConversionError, FmvError};
pub use identity::DocumentId;
pub use kind::RuntimeKind;
pub use record::DocumentRecord;

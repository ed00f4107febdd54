//! # Error Types
//!
//! Errors shared across fmv crates. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! Content violations (a document not matching its schema) are data, not
//! errors, and never appear here. These types cover the cases where the
//! tool cannot produce a meaningful result at all.

use thiserror::Error;

/// Top-level error type for document handling.
#[derive(Error, Debug)]
pub enum FmvError {
    /// A YAML value could not be represented in the JSON value model.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// The document or its frontmatter could not be loaded.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Identity or filesystem path of the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}

/// Error converting a YAML value tree into a JSON value tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// JSON cannot represent NaN or infinite floats.
    #[error("cannot represent float {0} in JSON")]
    NonFiniteFloat(f64),

    /// A YAML number that fits none of i64, u64 or f64.
    #[error("unsupported YAML number: {0}")]
    UnsupportedNumber(String),

    /// Two distinct YAML keys stringify to the same JSON key.
    #[error("duplicate key '{0}' after converting mapping keys to strings")]
    DuplicateKey(String),

    /// Mapping keys must be scalars.
    #[error("unsupported YAML map key: {0}")]
    UnsupportedKey(String),
}

//! # Document Records
//!
//! A `DocumentRecord` is one document's identity plus its metadata mapping,
//! as handed to the validator by whatever extracted it. Records are
//! immutable once built.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FmvError;
use crate::identity::DocumentId;
use crate::kind::RuntimeKind;

/// One document's metadata, keyed by its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Path-like identity of the document.
    pub identity: DocumentId,
    /// Metadata keys in the document's own order.
    pub metadata: Map<String, Value>,
}

impl DocumentRecord {
    /// Build a record from an identity and a metadata mapping.
    pub fn new(identity: impl Into<DocumentId>, metadata: Map<String, Value>) -> Self {
        Self {
            identity: identity.into(),
            metadata,
        }
    }

    /// Build a record from an arbitrary metadata value.
    ///
    /// `null` is treated as an empty mapping (a document with an empty
    /// frontmatter block).
    ///
    /// # Errors
    ///
    /// Returns `FmvError::DocumentLoad` if the value is neither a mapping
    /// nor `null`.
    pub fn from_value(identity: impl Into<DocumentId>, value: Value) -> Result<Self, FmvError> {
        let identity = identity.into();
        match value {
            Value::Object(metadata) => Ok(Self { identity, metadata }),
            Value::Null => Ok(Self {
                identity,
                metadata: Map::new(),
            }),
            other => Err(FmvError::DocumentLoad {
                path: identity.to_string(),
                reason: format!(
                    "metadata must be a mapping, found {}",
                    RuntimeKind::of(&other)
                ),
            }),
        }
    }
}

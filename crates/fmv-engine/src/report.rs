//! # Violation Report
//!
//! The drained contents of an [`ErrorCollector`](crate::ErrorCollector):
//! document identity → ordered violations. Serializes as a plain JSON
//! object so a follow-on tool can read a dumped report back.

use std::collections::BTreeMap;

use fmv_core::DocumentId;
use fmv_schema::Violation;
use serde::{Deserialize, Serialize};

/// Violations per document, ordered by identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationReport {
    entries: BTreeMap<DocumentId, Vec<Violation>>,
}

impl ViolationReport {
    pub(crate) fn from_entries(entries: BTreeMap<DocumentId, Vec<Violation>>) -> Self {
        Self { entries }
    }

    /// True if no document has violations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if at least one document has violations.
    pub fn has_violations(&self) -> bool {
        !self.is_empty()
    }

    /// Number of documents with violations.
    pub fn document_count(&self) -> usize {
        self.entries.len()
    }

    /// Total violations across all documents.
    pub fn violation_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Violations for one document.
    pub fn get(&self, identity: &DocumentId) -> Option<&[Violation]> {
        self.entries.get(identity).map(Vec::as_slice)
    }

    /// Iterate documents and their violations in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&DocumentId, &[Violation])> {
        self.entries.iter().map(|(id, v)| (id, v.as_slice()))
    }

    /// Keep only the violations for which `keep` returns true.
    ///
    /// Documents left with no violations are removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&DocumentId, &Violation) -> bool) {
        self.entries.retain(|id, violations| {
            violations.retain(|v| keep(id, v));
            !violations.is_empty()
        });
    }

    /// Consume the report.
    pub fn into_inner(self) -> BTreeMap<DocumentId, Vec<Violation>> {
        self.entries
    }
}

impl FromIterator<(DocumentId, Vec<Violation>)> for ViolationReport {
    fn from_iter<I: IntoIterator<Item = (DocumentId, Vec<Violation>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().filter(|(_, v)| !v.is_empty()).collect(),
        }
    }
}

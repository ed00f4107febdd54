//! # Error Collector
//!
//! Accumulates violations per document across a corpus pass. Appends only;
//! the single reset path is [`ErrorCollector::drain`].

use std::collections::BTreeMap;

use fmv_core::DocumentId;
use fmv_schema::Violation;

use crate::report::ViolationReport;

/// Append-only map from document identity to its violations.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    entries: BTreeMap<DocumentId, Vec<Violation>>,
}

impl ErrorCollector {
    /// An empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one violation, creating the document's entry on first use.
    pub fn append(&mut self, identity: &DocumentId, violation: Violation) {
        self.entries
            .entry(identity.clone())
            .or_default()
            .push(violation);
    }

    /// Append a batch in order. An empty batch creates no entry.
    pub fn extend(&mut self, identity: &DocumentId, violations: Vec<Violation>) {
        if violations.is_empty() {
            return;
        }
        self.entries
            .entry(identity.clone())
            .or_default()
            .extend(violations);
    }

    /// True if nothing has been collected since the last drain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of documents with at least one violation.
    pub fn document_count(&self) -> usize {
        self.entries.len()
    }

    /// Take everything collected so far and reset to empty.
    pub fn drain(&mut self) -> ViolationReport {
        ViolationReport::from_entries(std::mem::take(&mut self.entries))
    }
}

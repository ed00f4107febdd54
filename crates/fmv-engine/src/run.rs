//! # Validation Run Lifecycle
//!
//! [`FrontmatterValidator`] owns one [`ErrorCollector`] and a shared,
//! read-only [`Schema`], and is driven by its host through three phases:
//!
//! ```text
//! on_record(r1) ─┐
//! on_record(r2) ─┼──▶ on_corpus_complete() ──▶ outcome, collector reset
//! on_record(rN) ─┘            │
//!                             └── (watch loop: repeat per rebuild)
//!
//! on_run_finalize() ──▶ final outcome, validator consumed
//! ```
//!
//! With no schema the validator is a no-op: records are skipped, hooks are
//! not called, and every outcome is clean.
//!
//! Validation is single-threaded. Each record is validated to completion
//! before the next is looked at.

use std::fmt;
use std::sync::Arc;

use fmv_core::{DocumentId, DocumentRecord};
use fmv_schema::{validate_record, Schema, SchemaError};
use serde_json::Value;

use crate::collector::ErrorCollector;
use crate::report::ViolationReport;

/// Decides which documents are skipped entirely.
pub trait Exclusion {
    /// True if `identity` must not be validated.
    fn is_excluded(&self, identity: &DocumentId) -> bool;
}

impl<F> Exclusion for F
where
    F: Fn(&DocumentId) -> bool,
{
    fn is_excluded(&self, identity: &DocumentId) -> bool {
        self(identity)
    }
}

/// Rewrites a drained report before it is treated as final.
pub trait PostProcess {
    /// Transform the report. Called exactly once per corpus pass.
    fn apply(&self, report: ViolationReport, context: &RunContext) -> ViolationReport;
}

impl<F> PostProcess for F
where
    F: Fn(ViolationReport, &RunContext) -> ViolationReport,
{
    fn apply(&self, report: ViolationReport, context: &RunContext) -> ViolationReport {
        self(report, context)
    }
}

/// Counters for one corpus pass, handed to post-processing hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// 1-based number of the pass this context describes.
    pub pass: u64,
    /// Documents validated in this pass.
    pub validated: usize,
    /// Documents skipped by the exclusion predicate in this pass.
    pub excluded: usize,
    /// Whether this is the finalizing pass.
    pub finalizing: bool,
}

/// What happened to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No schema is configured.
    NoSchema,
    /// The exclusion predicate matched.
    Excluded,
    /// Validated with no violations.
    Clean,
    /// Validated; this many violations were collected.
    Violations(usize),
}

/// Result of a completed corpus pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Violations per document after post-processing.
    pub report: ViolationReport,
    /// Counters for the pass.
    pub context: RunContext,
}

impl ValidationOutcome {
    /// True if any document has violations.
    pub fn has_violations(&self) -> bool {
        self.report.has_violations()
    }
}

/// Validates documents against a schema and collects violations per pass.
pub struct FrontmatterValidator {
    schema: Option<Arc<Schema>>,
    exclusion: Option<Box<dyn Exclusion>>,
    post_process: Option<Box<dyn PostProcess>>,
    collector: ErrorCollector,
    context: RunContext,
}

impl FrontmatterValidator {
    /// Create a validator. `None` means no schema: every run is clean.
    pub fn new(schema: Option<Arc<Schema>>) -> Self {
        Self {
            schema,
            exclusion: None,
            post_process: None,
            collector: ErrorCollector::new(),
            context: RunContext {
                pass: 1,
                ..RunContext::default()
            },
        }
    }

    /// Create a validator from an unchecked schema value.
    ///
    /// # Errors
    ///
    /// Returns the [`SchemaError`] if the value is not a well-formed schema.
    /// No document is validated under a rejected schema.
    pub fn from_schema_value(value: &Value) -> Result<Self, SchemaError> {
        let schema = Schema::from_value(value)?;
        Ok(Self::new(schema.map(Arc::new)))
    }

    /// Skip documents for which `exclusion` matches.
    pub fn with_exclusion(mut self, exclusion: impl Exclusion + 'static) -> Self {
        self.exclusion = Some(Box::new(exclusion));
        self
    }

    /// Transform each pass's report with `hook` before it is returned.
    pub fn with_post_process(mut self, hook: impl PostProcess + 'static) -> Self {
        self.post_process = Some(Box::new(hook));
        self
    }

    /// The configured schema, if any.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_deref()
    }

    /// Validate one document and collect its violations.
    pub fn on_record(&mut self, record: &DocumentRecord) -> RecordOutcome {
        let Some(schema) = self.schema.as_deref() else {
            return RecordOutcome::NoSchema;
        };

        if self
            .exclusion
            .as_ref()
            .is_some_and(|e| e.is_excluded(&record.identity))
        {
            tracing::debug!(document = %record.identity, "excluded from validation");
            self.context.excluded += 1;
            return RecordOutcome::Excluded;
        }

        self.context.validated += 1;
        let violations = validate_record(schema, &record.metadata);
        let count = violations.len();
        tracing::debug!(document = %record.identity, violations = count, "validated");
        self.collector.extend(&record.identity, violations);

        if count == 0 {
            RecordOutcome::Clean
        } else {
            RecordOutcome::Violations(count)
        }
    }

    /// Finish the current pass: drain the collector, apply the hook, and
    /// start a fresh pass.
    pub fn on_corpus_complete(&mut self) -> ValidationOutcome {
        self.complete_pass(false)
    }

    /// Finish the last pass and consume the validator.
    ///
    /// Anything recorded since the previous [`on_corpus_complete`] is
    /// included. If nothing was recorded, the outcome is empty.
    ///
    /// [`on_corpus_complete`]: Self::on_corpus_complete
    pub fn on_run_finalize(mut self) -> ValidationOutcome {
        self.complete_pass(true)
    }

    /// Run a whole corpus through [`on_record`](Self::on_record) and
    /// complete the pass.
    pub fn validate_corpus<'a, I>(&mut self, records: I) -> ValidationOutcome
    where
        I: IntoIterator<Item = &'a DocumentRecord>,
    {
        for record in records {
            self.on_record(record);
        }
        self.on_corpus_complete()
    }

    fn complete_pass(&mut self, finalizing: bool) -> ValidationOutcome {
        let mut context = self.context.clone();
        context.finalizing = finalizing;
        let mut report = self.collector.drain();

        if self.schema.is_some() {
            if let Some(hook) = &self.post_process {
                report = hook.apply(report, &context);
            }
        }

        tracing::info!(
            pass = context.pass,
            validated = context.validated,
            excluded = context.excluded,
            documents_with_violations = report.document_count(),
            violations = report.violation_count(),
            "corpus pass complete"
        );

        self.context = RunContext {
            pass: context.pass + 1,
            ..RunContext::default()
        };
        ValidationOutcome { report, context }
    }
}

impl fmt::Debug for FrontmatterValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrontmatterValidator")
            .field("schema", &self.schema)
            .field("exclusion", &self.exclusion.is_some())
            .field("post_process", &self.post_process.is_some())
            .field("collector", &self.collector)
            .field("context", &self.context)
            .finish()
    }
}

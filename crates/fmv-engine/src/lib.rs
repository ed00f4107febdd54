//! # fmv-engine: Validation Runs
//!
//! Drives record validation over a corpus and accumulates the results.
//!
//! ## Collection (`collector`)
//!
//! [`ErrorCollector`] maps each document identity to its violations in
//! detection order. Clean documents get no entry. [`ErrorCollector::drain`]
//! hands everything over as a [`ViolationReport`] and leaves the collector
//! empty, ready for the next pass.
//!
//! ## Lifecycle (`run`)
//!
//! [`FrontmatterValidator`] exposes the three phases a host build calls:
//!
//! - [`on_record`](FrontmatterValidator::on_record): once per document.
//! - [`on_corpus_complete`](FrontmatterValidator::on_corpus_complete): after
//!   each full pass (including every rebuild in a watch loop).
//! - [`on_run_finalize`](FrontmatterValidator::on_run_finalize): once, at
//!   the end of the process's last pass.
//!
//! Exclusion predicates and post-processing hooks plug in through the
//! [`Exclusion`] and [`PostProcess`] traits. Whether violations fail a build
//! is the caller's decision; this crate only reports them.

pub mod collector;
pub mod report;
pub mod run;

pub use collector::ErrorCollector;
pub use report::ViolationReport;
pub use run::{
    Exclusion, FrontmatterValidator, PostProcess, RecordOutcome, RunContext, ValidationOutcome,
};

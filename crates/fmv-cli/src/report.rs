//! # Reporters
//!
//! Render a finished validation pass for a human or for a machine. The
//! engine hands over a [`ValidationOutcome`]; reporters only format it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use fmv_engine::{ValidationOutcome, ViolationReport};

/// Renders a validation outcome.
pub trait Reporter {
    /// Write the outcome.
    fn report(&mut self, outcome: &ValidationOutcome) -> std::io::Result<()>;
}

/// Plain-text report, one block per document.
///
/// ```text
/// /posts/a.md: 2 violation(s)
///   - missing required key 'title'
///   - key 'extra' is not declared in the schema
/// 2 violation(s) in 1 document(s)
/// ```
///
/// With color enabled the identity is bold, violation lines are yellow, and
/// the summary is red or green. Color is off unless asked for.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    out: W,
    color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    /// Report to `out`, without color.
    pub fn new(out: W) -> Self {
        Self { out, color: false }
    }

    /// Enable or disable ANSI color.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, outcome: &ValidationOutcome) -> std::io::Result<()> {
        let report = &outcome.report;
        for (identity, violations) in report.iter() {
            let count = format!("{} violation(s)", violations.len());
            if self.color {
                writeln!(self.out, "{}: {}", identity.as_str().bold(), count.red())?;
            } else {
                writeln!(self.out, "{identity}: {count}")?;
            }
            for violation in violations {
                let line = format!("  - {violation}");
                if self.color {
                    writeln!(self.out, "{}", line.yellow())?;
                } else {
                    writeln!(self.out, "{line}")?;
                }
            }
        }

        let summary = if report.is_empty() {
            format!(
                "all documents valid ({} validated, {} excluded)",
                outcome.context.validated, outcome.context.excluded
            )
        } else {
            format!(
                "{} violation(s) in {} document(s)",
                report.violation_count(),
                report.document_count()
            )
        };
        match (self.color, report.is_empty()) {
            (false, _) => writeln!(self.out, "{summary}")?,
            (true, true) => writeln!(self.out, "{}", summary.green().bold())?,
            (true, false) => writeln!(self.out, "{}", summary.red().bold())?,
        }
        self.out.flush()
    }
}

/// The report as a single pretty-printed JSON object.
#[derive(Debug)]
pub struct JsonReporter<W> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    /// Report to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, outcome: &ValidationOutcome) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &outcome.report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Write `report` to `path` as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_dump(path: &Path, report: &ViolationReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating dump directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("creating dump file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("writing dump file {}", path.display()))?;
    writer.flush()?;
    tracing::info!(path = %path.display(), "violation report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmv_core::DocumentRecord;
    use fmv_engine::FrontmatterValidator;
    use serde_json::json;

    fn outcome() -> ValidationOutcome {
        let mut v = FrontmatterValidator::from_schema_value(&json!({
            "title": {"required": true, "type": "String"}
        }))
        .unwrap();
        v.on_record(&DocumentRecord::from_value("/a.md", json!({"extra": 1})).unwrap());
        v.on_record(&DocumentRecord::from_value("/b.md", json!({"title": "ok"})).unwrap());
        v.on_corpus_complete()
    }

    #[test]
    fn test_console_report() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.report(&outcome()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "/a.md: 2 violation(s)\n\
             \x20 - missing required key 'title'\n\
             \x20 - key 'extra' is not declared in the schema\n\
             2 violation(s) in 1 document(s)\n"
        );
    }

    #[test]
    fn test_console_report_colored() {
        colored::control::set_override(true);
        let mut reporter = ConsoleReporter::new(Vec::new()).with_color(true);
        reporter.report(&outcome()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("/a.md"));
        assert!(text.contains("missing required key 'title'"));
        assert!(text.contains("2 violation(s) in 1 document(s)"));
        assert_ne!(text.lines().next(), Some("/a.md: 2 violation(s)"));
    }

    #[test]
    fn test_console_report_clean() {
        let mut v = FrontmatterValidator::from_schema_value(&json!({
            "title": {"type": "String"}
        }))
        .unwrap();
        v.on_record(&DocumentRecord::from_value("/a.md", json!({})).unwrap());
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.report(&v.on_corpus_complete()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(text, "all documents valid (1 validated, 0 excluded)\n");
    }

    #[test]
    fn test_json_report() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.report(&outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(
            value,
            json!({"/a.md": [
                {"kind": "missing_key", "field": "title"},
                {"kind": "invalid_key", "field": "extra"}
            ]})
        );
    }

    #[test]
    fn test_write_dump_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/report.json");
        write_dump(&path, &outcome().report).unwrap();
        let back: ViolationReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.violation_count(), 2);
    }
}

//! # Check Subcommand
//!
//! Validates every document under the corpus root and reports the result.
//! With `strict` set, any violation makes the command fail.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, ValueEnum};
use fmv_engine::{FrontmatterValidator, ValidationOutcome};

use crate::config::Config;
use crate::corpus;
use crate::exclude::GlobExclusion;
use crate::frontmatter;
use crate::report::{self, ConsoleReporter, JsonReporter, Reporter};

/// Output format for the report on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Plain text, one block per document.
    Human,
    /// A JSON object keyed by document identity.
    Json,
}

/// Arguments for the check subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Config file (defaults to ./fmv.yaml if present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Corpus root directory.
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Skip documents whose identity matches this glob (repeatable).
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Exit with a failure status when violations are found.
    #[arg(long)]
    pub strict: bool,

    /// Write the violation report as JSON to this file.
    #[arg(long, value_name = "PATH")]
    pub dump: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Human)]
    pub format: Format,

    /// Disable colored output. Color is also off when stdout is not a
    /// terminal.
    #[arg(long)]
    pub no_color: bool,
}

impl CheckArgs {
    /// Load the config file and apply flag overrides.
    ///
    /// Relative paths in the config file are relative to the file; relative
    /// `--root` and `--dump` paths are relative to the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref()).context("loading configuration")?;
        if self.root.is_some() || self.dump.is_some() {
            let cwd = std::env::current_dir().context("reading working directory")?;
            if let Some(root) = &self.root {
                config.root = from_working_dir(&cwd, root);
            }
            if let Some(dump) = &self.dump {
                config.dump = Some(from_working_dir(&cwd, dump));
            }
        }
        config.exclude.extend(self.exclude.iter().cloned());
        config.strict |= self.strict;
        Ok(config)
    }
}

fn from_working_dir(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Run the check subcommand. Returns `true` if the process should fail.
///
/// # Errors
///
/// Returns an error for configuration problems or an unreadable corpus
/// root. Violations are never errors.
pub fn run(args: &CheckArgs) -> anyhow::Result<bool> {
    let config = args.resolve_config()?;
    let outcome = validate(&config)?;

    let stdout = std::io::stdout().lock();
    match args.format {
        Format::Human => {
            let color = !args.no_color && stdout.is_terminal();
            ConsoleReporter::new(stdout).with_color(color).report(&outcome)?;
        }
        Format::Json => JsonReporter::new(stdout).report(&outcome)?,
    }

    if let Some(dump) = &config.dump {
        report::write_dump(&config.resolve(dump), &outcome.report)?;
    }

    let fail = config.strict && outcome.has_violations();
    if fail {
        tracing::error!(
            violations = outcome.report.violation_count(),
            "frontmatter validation failed"
        );
    }
    Ok(fail)
}

/// Validate the corpus described by `config`.
///
/// Documents whose frontmatter cannot be loaded are logged and skipped.
///
/// # Errors
///
/// Returns an error if the schema or exclude patterns are invalid, or the
/// corpus root cannot be read.
pub fn validate(config: &Config) -> anyhow::Result<ValidationOutcome> {
    let schema = config.load_schema().context("loading schema")?;
    let exclusion = GlobExclusion::new(config.exclude.as_slice())?;
    let mut validator = FrontmatterValidator::new(schema.map(Arc::new)).with_exclusion(exclusion);

    if validator.schema().is_none() {
        tracing::info!("no schema configured; nothing to validate");
        return Ok(validator.on_run_finalize());
    }

    let root = config.root_dir();
    let documents = corpus::discover(&root, &config.extensions)
        .with_context(|| format!("reading corpus root {}", root.display()))?;
    tracing::info!(root = %root.display(), documents = documents.len(), "validating corpus");

    for path in &documents {
        let identity = corpus::identity_for(&root, path);
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(document = %identity, error = %e, "skipping unreadable document");
                continue;
            }
        };
        match frontmatter::parse_record(identity.clone(), &content) {
            Ok(record) => {
                validator.on_record(&record);
            }
            Err(e) => tracing::warn!(document = %identity, error = %e, "skipping document"),
        }
    }

    Ok(validator.on_run_finalize())
}

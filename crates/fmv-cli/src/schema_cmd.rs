//! # Schema Subcommand
//!
//! Loads the configured schema and prints one line per field, so a schema
//! can be checked without validating anything.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use fmv_schema::Schema;
use serde_json::Value;

use crate::config::Config;

/// Arguments for the schema subcommand.
#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Config file (defaults to ./fmv.yaml if present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Run the schema subcommand.
///
/// # Errors
///
/// Returns an error if the config or schema cannot be loaded.
pub fn run(args: &SchemaArgs) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref()).context("loading configuration")?;
    let schema = config.load_schema().context("loading schema")?;

    let mut out = std::io::stdout().lock();
    match schema {
        Some(schema) => write_schema(&mut out, &schema)?,
        None => writeln!(out, "no schema configured")?,
    }
    Ok(())
}

/// Write a one-line-per-field summary of `schema`.
pub fn write_schema(out: &mut impl Write, schema: &Schema) -> std::io::Result<()> {
    let width = schema.fields().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, spec) in schema.fields() {
        let presence = if spec.required { "required" } else { "optional" };
        write!(out, "{name:<width$}  {presence}  {}", spec.expected_type)?;
        if let Some(allowed) = &spec.allowed_values {
            write!(out, "  allowed: {}", Value::Array(allowed.clone()))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

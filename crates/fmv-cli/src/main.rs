//! # fmv CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// fmv: validate document frontmatter against a schema.
///
/// Scans a directory of markdown documents, checks each document's YAML
/// frontmatter against the configured schema, and reports every violation.
#[derive(Parser, Debug)]
#[command(name = "fmv", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate all documents under the corpus root.
    Check(fmv_cli::check::CheckArgs),
    /// Print the configured schema.
    Schema(fmv_cli::schema_cmd::SchemaArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => {
            if fmv_cli::check::run(&args)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Schema(args) => fmv_cli::schema_cmd::run(&args)?,
    }

    Ok(ExitCode::SUCCESS)
}

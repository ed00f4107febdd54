//! # fmv-cli: Frontmatter Validation CLI
//!
//! The glue around the validation engine: everything that touches the
//! filesystem, the terminal, or the process exit status lives here.
//!
//! ## Subcommands
//!
//! - `check`: validate every document under the corpus root
//! - `schema`: load the configured schema and print what it declares
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate validation to `fmv-engine`; no schema logic here.
//! - Reports go to stdout, logs to stderr.

pub mod check;
pub mod config;
pub mod corpus;
pub mod exclude;
pub mod frontmatter;
pub mod report;
pub mod schema_cmd;

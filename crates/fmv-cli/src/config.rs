//! # Configuration
//!
//! `fmv` reads a YAML configuration file, by default `fmv.yaml` in the
//! working directory:
//!
//! ```yaml
//! root: docs
//! extensions: [md, markdown]
//! exclude: ["drafts/**", "/README.md"]
//! strict: true
//! dump: target/frontmatter-report.json
//! schema:
//!   title:  { required: true, type: String }
//!   layout: { type: String, allowed: [post, page] }
//! ```
//!
//! Relative paths are resolved against the directory holding the config
//! file. A missing default config is not an error (defaults are used); a
//! missing explicitly named config is.
//!
//! # Precedence
//!
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (applied by the subcommand handlers)

use std::path::{Path, PathBuf};

use fmv_core::yaml_to_json_value;
use fmv_schema::{Schema, SchemaError};
use serde::Deserialize;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "fmv.yaml";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Inline schema.
    pub schema: Option<serde_yaml::Value>,
    /// Schema in a separate YAML/JSON file.
    pub schema_file: Option<PathBuf>,
    /// Corpus root directory.
    pub root: PathBuf,
    /// Document file extensions, without the dot.
    pub extensions: Vec<String>,
    /// Glob patterns of document identities to skip.
    pub exclude: Vec<String>,
    /// Fail when any violation is found.
    pub strict: bool,
    /// Where to write the JSON report.
    pub dump: Option<PathBuf>,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            schema_file: None,
            root: PathBuf::from("."),
            extensions: vec!["md".to_string()],
            exclude: Vec::new(),
            strict: false,
            dump: None,
            base_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load the config file at `path`, or the default file if `None`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if an explicit path cannot be read, and
    /// `ConfigError::Parse` if the file is not a valid config.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let mut config = Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.clone(),
            message,
        })?;
        config.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(config)
    }

    /// Parse config text. An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Resolve `path` against the config file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// The corpus root, resolved.
    pub fn root_dir(&self) -> PathBuf {
        self.resolve(&self.root)
    }

    /// Load the schema from `schema` or `schema_file`.
    ///
    /// Returns `Ok(None)` when neither is set or the schema is empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if both are set, and
    /// `ConfigError::Schema` if the schema is malformed.
    pub fn load_schema(&self) -> Result<Option<Schema>, ConfigError> {
        match (&self.schema, &self.schema_file) {
            (Some(_), Some(_)) => Err(ConfigError::InvalidValue(
                "'schema' and 'schema_file' are mutually exclusive".to_string(),
            )),
            (Some(inline), None) => {
                let value = yaml_to_json_value(inline)
                    .map_err(|e| SchemaError::Parse(e.to_string()))?;
                Ok(Schema::from_value(&value)?)
            }
            (None, Some(file)) => {
                let path = self.resolve(file);
                let source = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                if source.trim().is_empty() {
                    return Ok(None);
                }
                Ok(Schema::parse(&source)?)
            }
            (None, None) => Ok(None),
        }
    }
}

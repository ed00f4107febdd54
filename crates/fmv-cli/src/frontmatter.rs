//! # Frontmatter Extraction
//!
//! A document carries frontmatter when its first line is `---`. The block
//! runs to the next line that is exactly `---` or `...`. Documents without
//! a (closed) block have empty metadata.

use fmv_core::{yaml_to_json_value, DocumentId, DocumentRecord, FmvError};

const OPEN: &str = "---";
const CLOSE: [&str; 2] = ["---", "..."];

/// Return the frontmatter block of `content`, without its delimiters.
pub fn split_frontmatter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != OPEN {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if CLOSE.contains(&line.trim_end()) {
            return Some(&content[start..offset]);
        }
        offset += line.len();
    }
    None
}

/// Build a document record from a document's raw content.
///
/// # Errors
///
/// Returns `FmvError::DocumentLoad` if the frontmatter is not valid YAML
/// or not a mapping, and `FmvError::Conversion` if it holds values JSON
/// cannot represent.
pub fn parse_record(identity: DocumentId, content: &str) -> Result<DocumentRecord, FmvError> {
    let Some(block) = split_frontmatter(content) else {
        return DocumentRecord::from_value(identity, serde_json::Value::Null);
    };
    if block.trim().is_empty() {
        return DocumentRecord::from_value(identity, serde_json::Value::Null);
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|e| FmvError::DocumentLoad {
            path: identity.to_string(),
            reason: format!("invalid YAML frontmatter: {e}"),
        })?;
    let value = yaml_to_json_value(&yaml)?;
    DocumentRecord::from_value(identity, value)
}

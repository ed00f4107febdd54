//! # Glob Exclusion
//!
//! Exclusion patterns are globs matched against document identities.
//! Patterns starting with `/` match the identity as is; other patterns
//! match it without its leading `/`. `*` stays within one path segment;
//! `**` spans directories.

use fmv_core::DocumentId;
use fmv_engine::Exclusion;
use glob::{MatchOptions, Pattern};

use crate::config::ConfigError;

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A set of compiled exclusion globs.
#[derive(Debug, Clone, Default)]
pub struct GlobExclusion {
    patterns: Vec<Pattern>,
}

impl GlobExclusion {
    /// Compile `patterns`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` for the first pattern that is
    /// not a valid glob.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).map_err(|e| ConfigError::InvalidPattern {
                    pattern: p.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Exclusion for GlobExclusion {
    fn is_excluded(&self, identity: &DocumentId) -> bool {
        let full = identity.as_str();
        let relative = full.strip_prefix('/').unwrap_or(full);
        self.patterns.iter().any(|pattern| {
            let target = if pattern.as_str().starts_with('/') {
                full
            } else {
                relative
            };
            pattern.matches_with(target, OPTIONS)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excluded(patterns: &[&str], id: &str) -> bool {
        GlobExclusion::new(patterns)
            .unwrap()
            .is_excluded(&DocumentId::from(id))
    }

    #[test]
    fn test_relative_patterns() {
        assert!(excluded(&["drafts/**"], "/drafts/a.md"));
        assert!(excluded(&["drafts/**"], "/drafts/deep/b.md"));
        assert!(!excluded(&["drafts/**"], "/posts/drafts.md"));
    }

    #[test]
    fn test_absolute_patterns() {
        assert!(excluded(&["/README.md"], "/README.md"));
        assert!(!excluded(&["/README.md"], "/docs/README.md"));
    }

    #[test]
    fn test_star_stays_in_segment() {
        assert!(excluded(&["*.md"], "/index.md"));
        assert!(!excluded(&["*.md"], "/guide/index.md"));
        assert!(excluded(&["**/index.md"], "/guide/index.md"));
    }

    #[test]
    fn test_no_patterns_excludes_nothing() {
        let none: [&str; 0] = [];
        let exclusion = GlobExclusion::new(&none).unwrap();
        assert!(exclusion.is_empty());
        assert!(!exclusion.is_excluded(&DocumentId::from("/a.md")));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = GlobExclusion::new(&["[unclosed"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}

//! # Corpus Discovery
//!
//! Walks the corpus root for document files and derives each document's
//! identity: its path relative to the root, `/`-separated, with a leading
//! `/` (e.g. `/posts/a.md`). Hidden files and directories are skipped.
//! Symlinked files are read; symlinked directories are not entered, so a
//! link cycle cannot revisit the same documents under new identities.

use std::path::{Component, Path, PathBuf};

use fmv_core::DocumentId;

/// Recursively find documents under `root` whose extension is in
/// `extensions`. Paths are returned sorted.
///
/// # Errors
///
/// Returns the IO error if `root` itself cannot be read. Unreadable
/// subdirectories are logged and skipped.
pub fn discover(root: &Path, extensions: &[String]) -> std::io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        walk(&path, extensions, &mut documents);
    }
    documents.sort();
    Ok(documents)
}

fn walk(path: &Path, extensions: &[String], documents: &mut Vec<PathBuf>) {
    if path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
    {
        return;
    }

    let is_symlink = std::fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);

    if path.is_dir() {
        if is_symlink {
            tracing::debug!(path = %path.display(), "not following symlinked directory");
            return;
        }
        match std::fs::read_dir(path) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    walk(&entry.path(), extensions, documents);
                }
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable directory"),
        }
    } else if path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
    {
        documents.push(path.to_path_buf());
    }
}

/// Identity of `path` relative to `root`.
///
/// Paths outside `root` keep their full path as identity.
pub fn identity_for(root: &Path, path: &Path) -> DocumentId {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut id = String::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            id.push('/');
            id.push_str(&part.to_string_lossy());
        }
    }
    if id.is_empty() {
        id.push('/');
    }
    DocumentId::new(id)
}

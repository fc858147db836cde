//! Candidate directory classification
//!
//! Pure path helpers that decide how a candidate directory's files are laid
//! out:
//! - `Flat`: every file sits directly inside the same parent directory
//! - `Nested`: files span more than one immediate parent
//!
//! Callers enumerate the files; nothing here touches the filesystem.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a candidate directory's file set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// All files share one immediate parent directory
    Flat,
    /// Files are spread across multiple subdirectories
    Nested,
}

/// Error returned when there is nothing to classify
#[derive(Error, Debug)]
#[error("no files to classify")]
pub struct EmptyListing;

/// Normalize a filesystem path to forward-slash form
///
/// Windows drag-drop hands us backslash-separated paths; everything
/// downstream (store keys, classification, display names) expects forward
/// slashes with no trailing separator.
pub fn normalize_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Whether `root` equals `path` or is an ancestor directory of it
///
/// Both arguments must already be normalized.
pub fn is_path_prefix(root: &str, path: &str) -> bool {
    if root == path {
        return true;
    }
    if root == "/" {
        return path.starts_with('/');
    }
    path.strip_prefix(root)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

/// Classify a directory's enumerated files as flat or nested
pub fn classify(paths: &[String]) -> Result<Classification, EmptyListing> {
    let first = paths.first().ok_or(EmptyListing)?;
    let first_parent = parent_directory(&normalize_path(first)).to_string();

    for path in &paths[1..] {
        if parent_directory(&normalize_path(path)) != first_parent {
            return Ok(Classification::Nested);
        }
    }

    Ok(Classification::Flat)
}

/// Immediate parent directory of a normalized path
fn parent_directory(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some(("", _)) => "/",
        Some((parent, _)) => parent,
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("C:\\Photos\\Vacation"), "C:/Photos/Vacation");
        assert_eq!(normalize_path("/a/b/"), "/a/b");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/a/b"), "/a/b");
    }

    #[test]
    fn test_same_parent_is_flat() {
        let result = classify(&paths(&["/a/b/1.jpg", "/a/b/2.jpg", "/a/b/3.jpg"]));
        assert_eq!(result.unwrap(), Classification::Flat);
    }

    #[test]
    fn test_distinct_parents_are_nested() {
        let result = classify(&paths(&["/a/c/x/1.jpg", "/a/c/y/2.jpg"]));
        assert_eq!(result.unwrap(), Classification::Nested);
    }

    #[test]
    fn test_single_file_is_flat() {
        let result = classify(&paths(&["/a/b/only.jpg"]));
        assert_eq!(result.unwrap(), Classification::Flat);
    }

    #[test]
    fn test_empty_listing_is_an_error() {
        assert!(classify(&[]).is_err());
    }

    #[test]
    fn test_backslash_paths_classify_like_forward_slash() {
        let result = classify(&paths(&["C:\\p\\1.jpg", "C:/p/2.jpg"]));
        assert_eq!(result.unwrap(), Classification::Flat);
    }

    #[test]
    fn test_is_path_prefix() {
        assert!(is_path_prefix("/a/b", "/a/b"));
        assert!(is_path_prefix("/a/b", "/a/b/c"));
        assert!(!is_path_prefix("/a/b", "/a/bc"));
        assert!(!is_path_prefix("/a/b/c", "/a/b"));
        assert!(is_path_prefix("/", "/a"));
    }
}

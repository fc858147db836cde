//! Filesystem probe
//!
//! Async access to the local filesystem during watch intake, kept behind a
//! trait so the UI shell and tests can substitute their own:
//! - directory checks for dropped paths
//! - recursive file enumeration under a candidate root
//! - the native directory picker (owned by the UI shell)

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use lazy_static::lazy_static;

use crate::classify::normalize_path;
use crate::WatchError;

lazy_static! {
    /// Platform junk files that must not count as syncable content
    static ref IGNORED_FILES: HashSet<&'static str> =
        [".DS_Store", "Thumbs.db", "desktop.ini"].into_iter().collect();
}

/// Async filesystem access used during watch intake
#[async_trait]
pub trait FilesystemProbe: Send + Sync {
    /// Whether `path` exists and is a directory
    async fn is_directory(&self, path: &str) -> Result<bool, WatchError>;

    /// All files under `path`, recursively, as normalized absolute paths
    ///
    /// Hidden files and platform junk are excluded; they never count as
    /// syncable content and never influence classification.
    async fn enumerate_files(&self, path: &str) -> Result<Vec<String>, WatchError>;

    /// Open the native directory picker; `None` when the user cancels
    async fn select_directory(&self) -> Result<Option<String>, WatchError>;
}

/// Probe backed by tokio's filesystem bindings
///
/// `select_directory` always reports no selection here: the picker dialog
/// lives in the UI shell, which wraps this probe with its own.
pub struct TokioProbe;

#[async_trait]
impl FilesystemProbe for TokioProbe {
    async fn is_directory(&self, path: &str) -> Result<bool, WatchError> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(WatchError::FilesystemUnavailable(e.to_string())),
        }
    }

    async fn enumerate_files(&self, path: &str) -> Result<Vec<String>, WatchError> {
        let pattern = format!("{}/**/*", normalize_path(path));

        tokio::task::spawn_blocking(move || enumerate_blocking(&pattern))
            .await
            .map_err(|e| WatchError::FilesystemUnavailable(e.to_string()))?
    }

    async fn select_directory(&self) -> Result<Option<String>, WatchError> {
        Ok(None)
    }
}

/// Glob the pattern and keep the plain files worth syncing
fn enumerate_blocking(pattern: &str) -> Result<Vec<String>, WatchError> {
    let entries =
        glob::glob(pattern).map_err(|e| WatchError::FilesystemUnavailable(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| WatchError::FilesystemUnavailable(e.to_string()))?;

        if !path.is_file() || is_ignored(&path) {
            continue;
        }

        files.push(normalize_path(&path.to_string_lossy()));
    }

    Ok(files)
}

/// Hidden files and platform junk never count as syncable content
fn is_ignored(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.starts_with('.') || IGNORED_FILES.contains(name),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("photo.jpg");
        fs::write(&file, b"jpeg").unwrap();

        let probe = TokioProbe;
        let dir_path = dir.path().to_string_lossy().to_string();
        let file_path = file.to_string_lossy().to_string();

        assert!(probe.is_directory(&dir_path).await.unwrap());
        assert!(!probe.is_directory(&file_path).await.unwrap());
        assert!(!probe.is_directory("/no/such/path").await.unwrap());
    }

    #[tokio::test]
    async fn test_enumerate_recurses_and_skips_junk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.jpg"), b"b").unwrap();
        fs::write(dir.path().join(".DS_Store"), b"junk").unwrap();
        fs::write(dir.path().join(".hidden"), b"junk").unwrap();

        let probe = TokioProbe;
        let root = dir.path().to_string_lossy().to_string();
        let mut files = probe.enumerate_files(&root).await.unwrap();
        files.sort();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.jpg"));
        assert!(files[1].ends_with("sub/b.jpg"));
    }

    #[tokio::test]
    async fn test_headless_picker_reports_no_selection() {
        let probe = TokioProbe;
        assert!(probe.select_directory().await.unwrap().is_none());
    }
}

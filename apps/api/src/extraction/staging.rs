//! Transient storage for uploads awaiting the parser.
//!
//! Each upload gets its own timestamp-qualified file, so concurrent requests
//! never touch each other's files and no locking is needed. A `StagedFile`
//! always attempts deletion when it goes out of scope; deletion failures are
//! logged and never reach the caller.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

const FALLBACK_NAME: &str = "upload";

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("failed to create staging directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write staged file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The directory uploads are staged in between receipt and parsing.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the staging directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), StagingError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StagingError::CreateDir {
                path: self.dir.clone(),
                source,
            })
    }

    /// Writes `bytes` to a fresh file named after `original_name`.
    ///
    /// The guard is armed before the write, so a partial file left by a
    /// failed write is cleaned up as well.
    pub async fn stage(&self, original_name: &str, bytes: &[u8]) -> Result<StagedFile, StagingError> {
        let path = self.dir.join(unique_name(original_name));
        let staged = StagedFile::new(path);

        tokio::fs::write(staged.path(), bytes)
            .await
            .map_err(|source| StagingError::Write {
                path: staged.path().to_path_buf(),
                source,
            })?;

        debug!(path = %staged.path().display(), bytes = bytes.len(), "Staged upload");
        Ok(staged)
    }
}

/// Scoped handle to a staged upload.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    released: bool,
}

impl StagedFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file. Errors are logged, not returned.
    pub async fn release(mut self) {
        self.released = true;
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            log_cleanup_failure(&self.path, &e);
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            log_cleanup_failure(&self.path, &e);
        }
    }
}

fn log_cleanup_failure(path: &Path, e: &std::io::Error) {
    if e.kind() == std::io::ErrorKind::NotFound {
        debug!(path = %path.display(), "Staged file already gone");
    } else {
        warn!(path = %path.display(), "Error cleaning up file: {e}");
    }
}

/// `<unix-millis>-<8 hex>-<basename>`; the basename loses any directory part.
fn unique_name(original_name: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        &suffix[..8],
        sanitize(original_name)
    )
}

fn sanitize(original_name: &str) -> &str {
    let base = original_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    match base {
        "" | "." | ".." => FALLBACK_NAME,
        name => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("C:\\notes\\week1.pdf"), "week1.pdf");
        assert_eq!(sanitize("lecture.pdf"), "lecture.pdf");
    }

    #[test]
    fn test_sanitize_falls_back_for_empty_names() {
        assert_eq!(sanitize(""), FALLBACK_NAME);
        assert_eq!(sanitize("notes/.."), FALLBACK_NAME);
        assert_eq!(sanitize("dir/"), FALLBACK_NAME);
    }

    #[test]
    fn test_unique_names_differ_for_same_input() {
        let a = unique_name("lecture.pdf");
        let b = unique_name("lecture.pdf");
        assert_ne!(a, b);
        assert!(a.ends_with("-lecture.pdf"));
    }

    #[tokio::test]
    async fn test_stage_writes_inside_dir_and_release_deletes() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path());

        let staged = area.stage("../escape.pdf", b"%PDF-1.4").await.unwrap();
        assert_eq!(staged.path().parent().unwrap(), tmp.path());
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"%PDF-1.4");

        let path = staged.path().to_path_buf();
        staged.release().await;
        assert!(!path.exists());
        assert_eq!(entries(tmp.path()), 0);
    }

    #[tokio::test]
    async fn test_drop_without_release_deletes() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path());

        let path = {
            let staged = area.stage("a.pdf", b"x").await.unwrap();
            staged.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_release_of_missing_file_is_silent() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path());

        let staged = area.stage("a.pdf", b"x").await.unwrap();
        std::fs::remove_file(staged.path()).unwrap();
        staged.release().await;
    }

    #[tokio::test]
    async fn test_stage_into_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path().join("absent"));

        let err = area.stage("a.pdf", b"x").await.unwrap_err();
        assert!(matches!(err, StagingError::Write { .. }));
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path().join("a").join("uploads"));
        area.ensure_dir().await.unwrap();
        assert!(area.dir().is_dir());
    }
}

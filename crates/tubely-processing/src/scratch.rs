//! Exclusively-owned temporary files.
//!
//! A [`ScratchFile`] deletes its file when dropped: on success, on early return
//! through `?`, and while unwinding from a panic. A failed deletion is logged and
//! otherwise ignored so it never replaces the error that caused the exit.

use std::io;
use std::path::Path;

use tempfile::TempPath;

const SCRATCH_PREFIX: &str = "tubely-";

fn new_named(dir: &Path, suffix: &str) -> io::Result<tempfile::NamedTempFile> {
    let named = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .suffix(suffix)
        .tempfile_in(dir)?;
    tracing::debug!(path = %named.path().display(), "Scratch file created");
    Ok(named)
}

#[derive(Debug)]
pub struct ScratchFile {
    path: Option<TempPath>,
}

impl ScratchFile {
    /// Create an empty file in `dir` and open it for writing.
    ///
    /// The file is registered for deletion before this returns, so a failure
    /// anywhere afterwards still removes it.
    pub fn create_in(dir: &Path, suffix: &str) -> io::Result<(Self, tokio::fs::File)> {
        let (file, path) = new_named(dir, suffix)?.into_parts();
        Ok((
            ScratchFile { path: Some(path) },
            tokio::fs::File::from_std(file),
        ))
    }

    /// Reserve a new, empty scratch path in `dir` for a tool to write into.
    pub fn reserve_in(dir: &Path, suffix: &str) -> io::Result<Self> {
        let path = new_named(dir, suffix)?.into_temp_path();
        Ok(ScratchFile { path: Some(path) })
    }

    pub fn path(&self) -> &Path {
        // Only `Drop` takes the path.
        self.path.as_deref().unwrap_or(Path::new(""))
    }

    /// Open the file for reading from offset 0.
    pub async fn open(&self) -> io::Result<tokio::fs::File> {
        tokio::fs::File::open(self.path()).await
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };

        let shown = path.display().to_string();
        match path.close() {
            Ok(()) => tracing::debug!(path = %shown, "Scratch file removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                error = %e,
                path = %shown,
                "Failed to remove scratch file"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_scratch_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let (scratch, mut file) = ScratchFile::create_in(dir.path(), ".mp4").unwrap();
        file.write_all(b"hello").await.unwrap();
        file.flush().await.unwrap();
        drop(file);

        let path = scratch.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 5);
        assert!(path.extension().is_some_and(|e| e == "mp4"));

        drop(scratch);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_drop_tolerates_already_deleted_file() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchFile::reserve_in(dir.path(), ".mp4").unwrap();
        std::fs::remove_file(scratch.path()).unwrap();
        drop(scratch);
    }

    #[test]
    fn test_scratch_file_removed_during_unwind() {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();

        let result = std::panic::catch_unwind(move || {
            let _scratch = ScratchFile::reserve_in(&dir_path, ".mp4").unwrap();
            panic!("stage failed");
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_create_in_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(ScratchFile::create_in(&missing, ".mp4").is_err());
    }
}

//! Artifact persistence: write the assembled text to its destination.
//!
//! The write is atomic (temp file + rename in the destination directory) so
//! a crash or a full disk never leaves a truncated file that a caller could
//! mistake for a complete artifact. An existing file at the destination is
//! overwritten; there are no merge or append semantics.

use crate::error::Doc2TextError;
use std::path::Path;
use tracing::debug;

/// Write `text` to `path` as UTF-8, atomically, overwriting any existing file.
///
/// The parent directory is created if it does not exist.
pub async fn write_artifact(path: &Path, text: &str) -> Result<(), Doc2TextError> {
    let io_err = |source: std::io::Error| Doc2TextError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
    }

    // Temp file beside the destination so the rename stays on one filesystem.
    let file_name = path
        .file_name()
        .ok_or_else(|| Doc2TextError::OutputWrite {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "destination has no file name",
            ),
        })?
        .to_os_string();
    let mut tmp_name = file_name;
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, text.as_bytes())
        .await
        .map_err(io_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(io_err)?;

    debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_utf8_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");

        write_artifact(&path, "héllo wörld").await.expect("write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "héllo wörld");
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale previous artifact").expect("seed");

        write_artifact(&path, "fresh").await.expect("write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[tokio::test]
    async fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/deeper/out.txt");

        write_artifact(&path, "x").await.expect("write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x");
    }

    #[tokio::test]
    async fn empty_text_writes_zero_byte_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.txt");

        write_artifact(&path, "").await.expect("write");
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");

        write_artifact(&path, "content").await.expect("write");
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.txt")]);
    }
}

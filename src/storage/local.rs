// src/storage/local.rs

//! Local filesystem writes.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Write bytes to a path, creating parent directories as needed.
///
/// Writes go through a temp file and a rename so a crashed run never leaves
/// a half-written target behind.
pub async fn write_with_dirs(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let result = async {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await
    }
    .await;

    result.map_err(|e| AppError::write(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_bytes_and_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deep/nested/data.json");

        write_with_dirs(&path, b"{}").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");

        write_with_dirs(&path, b"first").await.unwrap();
        write_with_dirs(&path, b"second").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn leaves_no_temp_file_behind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");

        write_with_dirs(&path, b"{}").await.unwrap();
        assert!(!tmp.path().join("data.tmp").exists());
    }
}

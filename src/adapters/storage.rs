use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // write-then-rename so readers never see a half-written document
        let tmp_path = full_path.with_extension("tmp");
        tokio::fs::write(&tmp_path, data).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &full_path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                tracing::warn!("Could not remove {}: {}", tmp_path.display(), cleanup);
            }
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("nested/profiles.json", b"[]").await.unwrap();
        assert_eq!(storage.read_file("nested/profiles.json").await.unwrap(), b"[]");
        assert!(!temp_dir.path().join("nested/profiles.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        // a non-empty directory at the target path makes the rename fail
        std::fs::create_dir_all(temp_dir.path().join("profiles.json/inner")).unwrap();

        let result = storage.write_file("profiles.json", b"[]").await;
        assert!(result.is_err());
        assert!(!temp_dir.path().join("profiles.tmp").exists());
    }
}

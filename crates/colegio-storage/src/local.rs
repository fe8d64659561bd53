use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory of the disk (e.g., "storage/public")
    /// * `base_url` - Base URL files are served from (e.g., "http://localhost:8000/storage")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage key to a filesystem path, rejecting keys that could
    /// escape the base directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.contains("..")
            || storage_key.starts_with('/')
            || storage_key.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, key: &str, data: Vec<u8>) -> StorageResult<String> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.url_for_key(key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage put successful"
        );

        Ok(url)
    }

    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(data)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn delete_dir(&self, dir: &str) -> StorageResult<()> {
        let path = self.key_to_path(dir)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_dir_all(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!(
                "Failed to delete directory {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            dir = %dir,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete_dir successful"
        );

        Ok(())
    }

    async fn dir_is_empty(&self, dir: &str) -> StorageResult<bool> {
        let path = self.key_to_path(dir)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(true);
        }

        let mut entries = fs::read_dir(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to list directory {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(entries.next_entry().await?.is_none())
    }

    fn url_for_key(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:8000/storage".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_put_read_round_trip() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let data = b"pdf bytes".to_vec();
        let url = storage
            .put("diplomas/7/1/diploma.pdf", data.clone())
            .await
            .unwrap();

        assert_eq!(
            url,
            "http://localhost:8000/storage/diplomas/7/1/diploma.pdf"
        );
        assert_eq!(storage.read("diplomas/7/1/diploma.pdf").await.unwrap(), data);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let result = storage.read("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete_dir("../etc").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_delete_dir_removes_recursively_and_tolerates_missing() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        storage
            .put("banners/1/1/img.png", b"a".to_vec())
            .await
            .unwrap();
        storage
            .put("banners/1/1/conversions/thumb.png", b"b".to_vec())
            .await
            .unwrap();

        storage.delete_dir("banners/1/1").await.unwrap();
        assert!(!storage.exists("banners/1/1").await.unwrap());

        // Deleting an already-missing directory is fine.
        storage.delete_dir("banners/1/1").await.unwrap();
    }

    #[tokio::test]
    async fn test_dir_is_empty() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        // Missing directory counts as empty.
        assert!(storage.dir_is_empty("banners/9").await.unwrap());

        storage
            .put("banners/9/4/img.png", b"x".to_vec())
            .await
            .unwrap();
        assert!(!storage.dir_is_empty("banners/9").await.unwrap());

        storage.delete_dir("banners/9/4").await.unwrap();
        assert!(storage.dir_is_empty("banners/9").await.unwrap());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let result = storage.read("news_pdfs/1/1/missing.pdf").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}

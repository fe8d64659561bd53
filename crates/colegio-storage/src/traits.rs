//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement. The attachment store works against this trait and never
//! touches a concrete backend directly.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for colegio_core::AppError {
    fn from(err: StorageError) -> Self {
        colegio_core::AppError::Storage(err.to_string())
    }
}

/// Storage abstraction trait
///
/// Keys are slash-separated relative paths produced by [`crate::keys`];
/// backends must treat a key ending in `/` as a directory prefix.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a file under the given key, creating intermediate directories,
    /// and return its public URL.
    async fn put(&self, key: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Read a file by key.
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Check whether a file or directory exists at the key.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Remove a directory and everything under it. Removing a directory
    /// that does not exist is not an error.
    async fn delete_dir(&self, dir: &str) -> StorageResult<()>;

    /// True when the directory contains no files and no subdirectories.
    /// A missing directory counts as empty.
    async fn dir_is_empty(&self, dir: &str) -> StorageResult<bool>;

    /// Derive the public URL for a key without touching the filesystem.
    fn url_for_key(&self, key: &str) -> String;
}

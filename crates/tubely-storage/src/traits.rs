//! Storage abstraction trait
//!
//! This module defines the Storage trait the upload pipeline publishes through.

use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;
use tubely_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::S3(err.to_string())
    }
}

/// Where a published object landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedAsset {
    pub key: String,
    pub url: String,
    pub size_bytes: u64,
}

/// Storage abstraction trait
///
/// **Key format:** `{orientation}/{filename}`; see [`crate::keys`]. Keys must not
/// contain `..` or a leading `/`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload everything `reader` yields under `storage_key` and return the
    /// published asset with its public URL.
    ///
    /// The reader is consumed until EOF. Implementations stream the content
    /// rather than buffering it whole.
    async fn upload_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<PublishedAsset>;

    /// Public URL for `storage_key`. Pure function of configuration and key.
    fn public_url(&self, storage_key: &str) -> String;
}

pub(crate) fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() || storage_key.starts_with('/') || storage_key.contains("..") {
        return Err(StorageError::InvalidKey(storage_key.to_string()));
    }
    Ok(())
}

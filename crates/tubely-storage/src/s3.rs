use crate::traits::{validate_key, PublishedAsset, Storage, StorageError, StorageResult};
use crate::url::PublicUrlResolver;
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore, PutMultipartOptions, WriteMultipart,
};
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tubely_core::StorageConfig;

const READ_BUFFER_BYTES: usize = 64 * 1024;
const MAX_CONCURRENT_PARTS: usize = 8;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    urls: PublicUrlResolver,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// Credentials come from the environment (`AWS_ACCESS_KEY_ID`,
    /// `AWS_SECRET_ACCESS_KEY`, ...). A custom endpoint switches to an
    /// S3-compatible provider, e.g. "http://localhost:9000" for MinIO.
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(config.region.clone())
            .with_bucket_name(config.bucket.clone());

        if let Some(ref endpoint) = config.endpoint {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::with_store(
            Arc::new(store),
            config.bucket.clone(),
            PublicUrlResolver::from_config(config),
        ))
    }

    /// Wrap an already-built object store, e.g. `object_store::memory::InMemory`.
    pub fn with_store(store: Arc<dyn ObjectStore>, bucket: String, urls: PublicUrlResolver) -> Self {
        S3Storage { store, bucket, urls }
    }
}

async fn copy_into_upload(
    writer: &mut WriteMultipart,
    reader: &mut Pin<Box<dyn AsyncRead + Send + Unpin>>,
) -> StorageResult<u64> {
    let mut buffer = vec![0u8; READ_BUFFER_BYTES];
    let mut size = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }

        writer
            .wait_for_capacity(MAX_CONCURRENT_PARTS)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        writer.write(&buffer[..bytes_read]);
        size += bytes_read as u64;
    }

    Ok(size)
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<PublishedAsset> {
        validate_key(storage_key)?;

        let start = std::time::Instant::now();
        let location = Path::from(storage_key);

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        let opts = PutMultipartOptions {
            attributes,
            ..Default::default()
        };

        let upload = self
            .store
            .put_multipart_opts(&location, opts)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let mut writer = WriteMultipart::new(upload);

        let size = match copy_into_upload(&mut writer, &mut reader).await {
            Ok(size) => size,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 stream upload failed"
                );
                if let Err(abort_err) = writer.abort().await {
                    tracing::warn!(
                        error = %abort_err,
                        key = %storage_key,
                        "Failed to abort multipart upload"
                    );
                }
                return Err(e);
            }
        };

        writer.finish().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload completion failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.public_url(storage_key);

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 stream upload successful"
        );

        Ok(PublishedAsset {
            key: storage_key.to_string(),
            url,
            size_bytes: size,
        })
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.urls.resolve(storage_key)
    }
}

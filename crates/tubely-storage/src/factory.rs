use crate::{S3Storage, Storage, StorageResult};
use std::sync::Arc;
use tubely_core::Config;

/// Create the object store publisher from configuration
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage_config = config.storage();
    let storage = S3Storage::new(storage_config)?;

    tracing::info!(
        bucket = %storage_config.bucket,
        region = %storage_config.region,
        endpoint = ?storage_config.endpoint,
        cdn_host = ?storage_config.cdn_host,
        "Object storage configured"
    );

    Ok(Arc::new(storage))
}

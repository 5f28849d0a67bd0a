//! Tubely Storage Library
//!
//! This crate provides the object store publisher used by the upload pipeline:
//! the [`Storage`] trait, its S3 implementation, key generation and public URL
//! resolution.
//!
//! # Storage key format
//!
//! Keys are `{orientation}/{random}{ext}`, e.g. `landscape/3q2-7wDR0vA4GQ1TeLo0Lg.mp4`.
//! The random part is 16 bytes from a CSPRNG encoded as unpadded URL-safe base64.

pub mod factory;
pub mod keys;
pub mod s3;
pub mod traits;
pub mod url;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{generate_storage_key, media_type_extension};
pub use s3::S3Storage;
pub use traits::{PublishedAsset, Storage, StorageError, StorageResult};
pub use url::PublicUrlResolver;

//! Tubely Core Library
//!
//! This crate provides the domain model, error types, configuration and constants
//! shared by every Tubely component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, MediaToolConfig, ServiceConfig, StorageConfig, UploadSettings};
pub use error::{AppError, ErrorMetadata, LogLevel};

//! Video upload: content-type validation and the pipeline that takes an
//! accepted body through to a persisted video URL.

pub mod pipeline;
pub mod validation;

pub use pipeline::{UploadPipeline, UploadRequest, UploadTooLarge};
pub use validation::{validate_content_type, ContentTypeError};

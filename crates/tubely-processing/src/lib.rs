//! Tubely Processing Library
//!
//! Everything between an accepted request body and a persisted video URL:
//! content-type validation, scratch files, ffprobe/ffmpeg invocation,
//! orientation classification and the upload pipeline that sequences them.

pub mod error;
pub mod metadata;
pub mod orientation;
pub mod scratch;
pub mod upload;
pub mod video;

// Re-export commonly used types
pub use error::MediaToolError;
pub use metadata::{CodecClass, StreamDescriptor, StreamMetadata};
pub use orientation::{classify, Orientation};
pub use scratch::ScratchFile;
pub use upload::{validate_content_type, UploadPipeline, UploadRequest};
pub use video::{FfmpegMediaTool, MediaTool};

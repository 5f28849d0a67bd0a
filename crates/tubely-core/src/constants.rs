//! Application-wide constants.

/// Hard cap on a single video upload (1 GiB).
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 1 << 30;

/// Extra bytes allowed on top of the upload cap for multipart framing
/// (boundaries and part headers) at the HTTP body-limit layer.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 1 << 20;

/// Media types accepted by the video upload endpoint.
///
/// This is an allow-list of exactly one entry. Every other `video/*` type is
/// rejected even though it parses as a video media type.
pub const ALLOWED_VIDEO_TYPES: &[&str] = &["video/mp4"];

/// Multipart form field carrying the video bytes.
pub const VIDEO_FORM_FIELD: &str = "video";

/// Issuer expected in access tokens.
pub const JWT_ISSUER: &str = "tubely-access";

/// Default timeout for a single ffprobe/ffmpeg invocation.
pub const DEFAULT_MEDIA_TOOL_TIMEOUT_SECS: u64 = 600;

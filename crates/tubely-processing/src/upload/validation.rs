use tubely_core::constants::ALLOWED_VIDEO_TYPES;
use tubely_core::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ContentTypeError {
    #[error("Missing Content-Type for video")]
    Missing,

    #[error("Invalid Content-Type: {0}")]
    Unparseable(String),

    #[error("Invalid file type: {0} is not a video")]
    NotVideo(String),

    #[error("Unsupported video type: {content_type} (allowed: {allowed:?})")]
    NotAllowed {
        content_type: String,
        allowed: &'static [&'static str],
    },
}

impl From<ContentTypeError> for AppError {
    fn from(err: ContentTypeError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Check the declared content type of an upload and return its essence
/// (`type/subtype`, lowercased, parameters dropped).
///
/// Only the declared header is inspected; the bytes are never sniffed.
pub fn validate_content_type(declared: Option<&str>) -> Result<String, ContentTypeError> {
    let declared = declared.map(str::trim).unwrap_or("");
    if declared.is_empty() {
        return Err(ContentTypeError::Missing);
    }

    let parsed: mime::Mime = declared
        .parse()
        .map_err(|_| ContentTypeError::Unparseable(declared.to_string()))?;

    if parsed.type_() != mime::VIDEO {
        return Err(ContentTypeError::NotVideo(parsed.essence_str().to_string()));
    }

    let essence = parsed.essence_str().to_ascii_lowercase();
    if !ALLOWED_VIDEO_TYPES.contains(&essence.as_str()) {
        return Err(ContentTypeError::NotAllowed {
            content_type: essence,
            allowed: ALLOWED_VIDEO_TYPES,
        });
    }

    Ok(essence)
}

//! Storage key generation.
//!
//! Key format: `{prefix}/{random}{ext}` where `prefix` is the orientation label.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

const RANDOM_NAME_BYTES: usize = 16;

/// Extension for a media type: `.` followed by the subtype (`video/mp4` → `.mp4`),
/// or `.bin` when the type does not split into exactly two parts.
pub fn media_type_extension(media_type: &str) -> String {
    let parts: Vec<&str> = media_type.split('/').collect();
    if parts.len() != 2 {
        return ".bin".to_string();
    }
    format!(".{}", parts[1])
}

/// Random, URL-safe file name with the extension derived from `media_type`.
pub fn random_asset_filename(media_type: &str) -> String {
    let mut bytes = [0u8; RANDOM_NAME_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    format!(
        "{}{}",
        URL_SAFE_NO_PAD.encode(bytes),
        media_type_extension(media_type)
    )
}

/// Generate a storage key under `prefix` for content of `media_type`.
pub fn generate_storage_key(prefix: &str, media_type: &str) -> String {
    format!("{}/{}", prefix, random_asset_filename(media_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_extension() {
        assert_eq!(media_type_extension("video/mp4"), ".mp4");
        assert_eq!(media_type_extension("video"), ".bin");
        assert_eq!(media_type_extension("a/b/c"), ".bin");
    }

    #[test]
    fn test_storage_key_shape() {
        let key = generate_storage_key("landscape", "video/mp4");
        let (prefix, name) = key.split_once('/').unwrap();
        assert_eq!(prefix, "landscape");

        let stem = name.strip_suffix(".mp4").unwrap();
        assert_eq!(stem.len(), 22);
        assert!(stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_storage_keys_are_unique() {
        let a = generate_storage_key("portrait", "video/mp4");
        let b = generate_storage_key("portrait", "video/mp4");
        assert_ne!(a, b);
    }
}

//! Stream metadata derived from probing a media file.

/// Kind of elementary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecClass {
    Video,
    Audio,
    Other,
}

impl CodecClass {
    pub fn from_codec_type(codec_type: &str) -> Self {
        match codec_type {
            "video" => CodecClass::Video,
            "audio" => CodecClass::Audio,
            _ => CodecClass::Other,
        }
    }
}

/// One stream of a container. Width and height are 0 when the probe did not
/// report them, which is always the case for non-video streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub codec_class: CodecClass,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamMetadata {
    pub streams: Vec<StreamDescriptor>,
}

impl StreamMetadata {
    pub fn new(streams: Vec<StreamDescriptor>) -> Self {
        Self { streams }
    }

    /// First stream whose codec class is video, in container order.
    pub fn first_video(&self) -> Option<&StreamDescriptor> {
        self.streams
            .iter()
            .find(|s| s.codec_class == CodecClass::Video)
    }
}

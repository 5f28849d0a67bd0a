//! ffprobe invocation and output parsing.

use std::ffi::OsString;
use std::path::Path;

use serde::Deserialize;

use crate::error::MediaToolError;
use crate::metadata::{CodecClass, StreamDescriptor, StreamMetadata};

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    codec_type: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

pub fn probe_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-v", "error", "-print_format", "json", "-show_streams"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(path.as_os_str().to_owned());
    args
}

/// Parse ffprobe's `-print_format json -show_streams` output.
///
/// Fails when the output is not JSON or holds no video stream. A video stream
/// without width/height is reported as 0x0.
pub fn parse_probe_output(stdout: &[u8]) -> Result<StreamMetadata, MediaToolError> {
    let output: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| MediaToolError::InvalidOutput(e.to_string()))?;

    let streams = output
        .streams
        .into_iter()
        .map(|s| StreamDescriptor {
            codec_class: CodecClass::from_codec_type(s.codec_type.as_deref().unwrap_or("")),
            width: s.width.unwrap_or(0),
            height: s.height.unwrap_or(0),
        })
        .collect();

    let metadata = StreamMetadata::new(streams);
    if metadata.first_video().is_none() {
        return Err(MediaToolError::NoVideoStream);
    }

    Ok(metadata)
}

use std::path::PathBuf;

/// Failures of the external media tools (ffprobe, ffmpeg).
///
/// The pipeline decides which `AppError` kind a failure becomes, since the same
/// variant can come from either the probe or the remux stage.
#[derive(Debug, thiserror::Error)]
pub enum MediaToolError {
    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with status {code:?}: {stderr}")]
    NonZeroExit {
        tool: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{tool} timed out after {secs} seconds")]
    Timeout { tool: &'static str, secs: u64 },

    #[error("Unparseable probe output: {0}")]
    InvalidOutput(String),

    #[error("No video stream found")]
    NoVideoStream,

    #[error("Input file is missing or empty: {0}")]
    EmptyInput(PathBuf),

    #[error("Processed file is missing or empty: {0}")]
    EmptyOutput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tubely_core::MediaToolConfig;

use super::command::run_tool;
use super::probe::{parse_probe_output, probe_args};
use super::remux::{is_non_empty_file, remux_args};
use crate::error::MediaToolError;
use crate::metadata::StreamMetadata;
use crate::scratch::ScratchFile;

const REMUX_SUFFIX: &str = ".mp4";

/// External media operations the upload pipeline depends on.
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Read stream geometry from a local file.
    async fn probe(&self, path: &Path) -> Result<StreamMetadata, MediaToolError>;

    /// Rewrite `input` for fast-start playback into a new scratch file.
    ///
    /// The returned file is owned by the caller. On failure no output file is
    /// left behind.
    async fn remux(&self, input: &Path) -> Result<ScratchFile, MediaToolError>;
}

/// `MediaTool` backed by the ffprobe and ffmpeg binaries.
#[derive(Debug, Clone)]
pub struct FfmpegMediaTool {
    ffprobe_path: String,
    ffmpeg_path: String,
    timeout: Option<Duration>,
    scratch_dir: PathBuf,
}

impl FfmpegMediaTool {
    pub fn new(config: &MediaToolConfig, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: config.ffprobe_path.clone(),
            ffmpeg_path: config.ffmpeg_path.clone(),
            timeout: config.timeout,
            scratch_dir: scratch_dir.into(),
        }
    }
}

#[async_trait]
impl MediaTool for FfmpegMediaTool {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> Result<StreamMetadata, MediaToolError> {
        let start = std::time::Instant::now();

        let output = run_tool("ffprobe", &self.ffprobe_path, &probe_args(path), self.timeout).await?;
        let metadata = parse_probe_output(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis() as u64,
            stream_count = metadata.streams.len(),
            "Video probe completed"
        );

        Ok(metadata)
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "remux"
    ))]
    async fn remux(&self, input: &Path) -> Result<ScratchFile, MediaToolError> {
        if !is_non_empty_file(input).await? {
            return Err(MediaToolError::EmptyInput(input.to_path_buf()));
        }

        let start = std::time::Instant::now();
        let output = ScratchFile::reserve_in(&self.scratch_dir, REMUX_SUFFIX)?;

        run_tool(
            "ffmpeg",
            &self.ffmpeg_path,
            &remux_args(input, output.path()),
            self.timeout,
        )
        .await?;

        if !is_non_empty_file(output.path()).await? {
            return Err(MediaToolError::EmptyOutput(output.path().to_path_buf()));
        }

        tracing::info!(
            duration_ms = start.elapsed().as_millis() as u64,
            output = %output.path().display(),
            "Fast-start remux completed"
        );

        Ok(output)
    }
}

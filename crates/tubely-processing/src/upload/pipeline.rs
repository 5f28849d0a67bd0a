//! Upload pipeline: ownership → intake limit → content type → stage → probe →
//! classify → remux → key → publish → persist.
//!
//! Each stage is a hard boundary: the first failure aborts the run and the video
//! record is left as it was. Every scratch file is a [`ScratchFile`] local to
//! [`UploadPipeline::run`], so all of them are removed on every exit path.

use std::fmt;
use std::io::SeekFrom;
use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tubely_core::models::Video;
use tubely_core::{AppError, UploadSettings};
use tubely_db::VideoRepository;
use tubely_storage::{generate_storage_key, Storage};
use uuid::Uuid;

use super::validation::validate_content_type;
use crate::error::MediaToolError;
use crate::orientation::classify;
use crate::scratch::ScratchFile;
use crate::video::MediaTool;

const STAGED_SUFFIX: &str = ".mp4";

/// Marker carried inside an `io::Error` by body readers whose transport
/// refused the body for exceeding its size limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTooLarge;

impl fmt::Display for UploadTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("upload body exceeds the size limit")
    }
}

impl std::error::Error for UploadTooLarge {}

/// A single video upload.
pub struct UploadRequest<R> {
    /// Authenticated caller.
    pub user_id: Uuid,
    pub video_id: Uuid,
    /// Declared media type of the body, as sent by the client.
    pub content_type: Option<String>,
    pub body: R,
}

pub struct UploadPipeline {
    videos: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    media: Arc<dyn MediaTool>,
    settings: UploadSettings,
}

fn too_large(max_bytes: u64) -> AppError {
    AppError::PayloadTooLarge(format!(
        "Video exceeds the maximum upload size of {} bytes",
        max_bytes
    ))
}

fn probe_error(err: MediaToolError) -> AppError {
    tracing::error!(error = %err, "Video probe failed");
    AppError::MediaProbe(err.to_string())
}

fn remux_error(err: MediaToolError) -> AppError {
    tracing::error!(error = %err, "Fast-start remux failed");
    AppError::MediaRemux(err.to_string())
}

impl UploadPipeline {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        storage: Arc<dyn Storage>,
        media: Arc<dyn MediaTool>,
        settings: UploadSettings,
    ) -> Self {
        Self {
            videos,
            storage,
            media,
            settings,
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.settings.max_upload_bytes
    }

    /// Run one upload and return the updated record.
    #[tracing::instrument(skip(self, request), fields(
        video_id = %request.video_id,
        user_id = %request.user_id,
        storage_key = tracing::field::Empty,
    ))]
    pub async fn run<R>(&self, request: UploadRequest<R>) -> Result<Video, AppError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let start = std::time::Instant::now();
        let UploadRequest {
            user_id,
            video_id,
            content_type,
            body,
        } = request;

        let mut video = self
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;
        if !video.is_owned_by(user_id) {
            return Err(AppError::Unauthorized(
                "Not authorized to update this video".to_string(),
            ));
        }

        let max_bytes = self.settings.max_upload_bytes;
        // One byte past the cap is enough to tell an oversized body apart.
        let mut limited = body.take(max_bytes.saturating_add(1));

        let media_type = validate_content_type(content_type.as_deref())?;

        let (staged, mut staged_file) =
            ScratchFile::create_in(&self.settings.scratch_dir, STAGED_SUFFIX).map_err(|e| {
                AppError::Internal(format!("Failed to create scratch file: {}", e))
            })?;

        let size_bytes = match tokio::io::copy(&mut limited, &mut staged_file).await {
            Ok(n) => n,
            Err(e) if e.get_ref().is_some_and(|inner| inner.is::<UploadTooLarge>()) => {
                return Err(too_large(max_bytes));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read upload body");
                return Err(AppError::BadRequest(
                    "Failed to read upload body".to_string(),
                ));
            }
        };
        if size_bytes > max_bytes {
            return Err(too_large(max_bytes));
        }
        staged_file.flush().await?;
        staged_file.seek(SeekFrom::Start(0)).await?;

        tracing::debug!(size_bytes, path = %staged.path().display(), "Upload staged");

        let metadata = self
            .media
            .probe(staged.path())
            .await
            .map_err(probe_error)?;
        let stream = metadata
            .first_video()
            .copied()
            .ok_or_else(|| probe_error(MediaToolError::NoVideoStream))?;

        let orientation = classify(stream.width, stream.height);
        tracing::debug!(
            width = stream.width,
            height = stream.height,
            orientation = %orientation,
            aspect = orientation.aspect_label(),
            "Video classified"
        );

        let candidate = self
            .media
            .remux(staged.path())
            .await
            .map_err(remux_error)?;
        drop(staged_file);

        let key = generate_storage_key(orientation.as_str(), &media_type);
        tracing::Span::current().record("storage_key", key.as_str());

        let reader = candidate.open().await?;
        let asset = self
            .storage
            .upload_stream(&key, &media_type, Box::pin(reader))
            .await?;

        video.video_url = Some(asset.url);
        video.updated_at = Utc::now();
        self.videos.update_video(&video).await?;

        tracing::info!(
            storage_key = %asset.key,
            size_bytes = asset.size_bytes,
            orientation = %orientation,
            duration_ms = start.elapsed().as_millis() as u64,
            "Video upload completed"
        );

        Ok(video)
    }
}

use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::StatusCode,
    Json,
};
use futures::TryStreamExt;
use std::io;
use std::sync::Arc;
use tokio_util::io::StreamReader;
use tubely_core::constants::VIDEO_FORM_FIELD;
use tubely_core::models::VideoResponse;
use tubely_core::AppError;
use tubely_processing::upload::UploadTooLarge;
use tubely_processing::UploadRequest;
use uuid::Uuid;

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Unable to parse form file: {}", err.body_text()))
    }
}

/// Keeps the transport's size-limit signal recognisable once the field is
/// read as a plain byte stream.
fn body_read_error(err: MultipartError) -> io::Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        io::Error::other(UploadTooLarge)
    } else {
        io::Error::other(err)
    }
}

#[utoipa::path(
    post,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video record to attach the upload to")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video uploaded successfully", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(video_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id).map_err(AppError::from)?;
    let mut multipart = multipart.map_err(|rejection| {
        AppError::BadRequest(format!("Unable to parse form: {}", rejection.body_text()))
    })?;

    let field = loop {
        match multipart.next_field().await.map_err(multipart_error)? {
            Some(field) if field.name() == Some(VIDEO_FORM_FIELD) => break field,
            Some(_) => continue,
            None => {
                return Err(AppError::BadRequest(format!(
                    "Missing form field '{}'",
                    VIDEO_FORM_FIELD
                ))
                .into())
            }
        }
    };

    let content_type = field.content_type().map(str::to_string);
    let body = StreamReader::new(Box::pin(field.map_err(body_read_error)));

    let video = state
        .pipeline
        .run(UploadRequest {
            user_id: user.user_id,
            video_id,
            content_type,
            body,
        })
        .await?;

    Ok(Json(VideoResponse::from(video)))
}

//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tubely_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Video upload service. Uploaded videos are probed, classified by orientation, remuxed for fast-start playback and published to S3."
    ),
    paths(
        handlers::health::healthz,
        handlers::video_upload::upload_video,
    ),
    components(
        schemas(
            models::VideoResponse,
            error::ErrorResponse,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video upload endpoints"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_upload_route() {
        let spec = ApiDoc::openapi();
        assert!(spec.paths.paths.contains_key("/api/videos/{video_id}"));
        assert!(spec.paths.paths.contains_key("/api/healthz"));
    }
}

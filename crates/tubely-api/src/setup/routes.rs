//! Route configuration and setup.

use crate::api_doc::ApiDoc;
use crate::auth::middleware::auth_middleware;
use crate::error::HttpAppError;
use crate::handlers::{health, video_upload};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tubely_core::constants::MULTIPART_OVERHEAD_BYTES;
use tubely_core::AppError;
use utoipa::OpenApi;

const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 1_000;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/healthz", get(health::healthz))
        .route("/api/openapi.json", get(openapi_json))
}

/// Replace the body-limit layer's plain-text 413 with the JSON error body.
async fn json_payload_too_large(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    if response.status() != StatusCode::PAYLOAD_TOO_LARGE || is_json {
        return response;
    }

    HttpAppError(AppError::PayloadTooLarge(
        "Request body exceeds the upload size limit".to_string(),
    ))
    .into_response()
}

fn protected_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    // The transport limit sits above the intake cap by the multipart framing
    // allowance; the pipeline enforces the cap on the file bytes themselves.
    let body_limit = state
        .pipeline
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    Router::new()
        .route("/api/videos/{video_id}", post(video_upload::upload_video))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(axum::middleware::map_response(json_payload_too_large))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
}

fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_HTTP_CONCURRENCY_LIMIT)
        .max(1);
    tracing::info!(http_concurrency_limit, "HTTP concurrency limit layer enabled");

    public_routes()
        .merge(protected_routes(&state))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(setup_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::auth::JwtService;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::PgVideoRepository;
use tubely_processing::{FfmpegMediaTool, UploadPipeline};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    // Database
    let pool = tubely_db::connect(config.database_url(), config.db_max_connections())
        .await
        .context("Failed to connect to database")?;
    tubely_db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed");

    // Storage
    let storage = tubely_storage::create_storage(&config).context("Failed to set up storage")?;

    // Scratch space and media tools
    let upload = config.upload().clone();
    tokio::fs::create_dir_all(&upload.scratch_dir)
        .await
        .with_context(|| format!("Failed to create {}", upload.scratch_dir.display()))?;
    let media = FfmpegMediaTool::new(config.media_tools(), upload.scratch_dir.clone());

    let pipeline = UploadPipeline::new(
        Arc::new(PgVideoRepository::new(pool)),
        storage,
        Arc::new(media),
        upload,
    );

    let state = Arc::new(AppState::new(pipeline, JwtService::new(config.jwt_secret())));
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}

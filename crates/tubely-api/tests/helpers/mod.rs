//! Test helpers: build AppState and router for integration tests.
//!
//! The router runs against the in-memory video repository, an in-memory object
//! store and a fake media tool, so no database, S3 or ffmpeg is needed.

use async_trait::async_trait;
use axum_test::TestServer;
use object_store::memory::InMemory;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::JwtService;
use tubely_api::setup::routes;
use tubely_api::AppState;
use tubely_core::models::Video;
use tubely_core::UploadSettings;
use tubely_db::InMemoryVideoRepository;
use tubely_processing::{
    CodecClass, MediaTool, MediaToolError, ScratchFile, StreamDescriptor, StreamMetadata,
    UploadPipeline,
};
use tubely_storage::{PublicUrlResolver, S3Storage};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters";
pub const TEST_MAX_UPLOAD_BYTES: u64 = 4096;
pub const REMUXED: &[u8] = b"remuxed-fast-start";

/// Probe result the fake media tool reports.
#[derive(Clone, Copy)]
pub enum FakeProbe {
    Video(u32, u32),
    Fail,
}

pub struct FakeMediaTool {
    probe: FakeProbe,
    scratch_dir: PathBuf,
}

#[async_trait]
impl MediaTool for FakeMediaTool {
    async fn probe(&self, _path: &Path) -> Result<StreamMetadata, MediaToolError> {
        match self.probe {
            FakeProbe::Video(width, height) => Ok(StreamMetadata::new(vec![StreamDescriptor {
                codec_class: CodecClass::Video,
                width,
                height,
            }])),
            FakeProbe::Fail => Err(MediaToolError::NonZeroExit {
                tool: "ffprobe",
                code: Some(1),
                stderr: "moov atom not found".to_string(),
            }),
        }
    }

    async fn remux(&self, _input: &Path) -> Result<ScratchFile, MediaToolError> {
        let output = ScratchFile::reserve_in(&self.scratch_dir, ".mp4")?;
        tokio::fs::write(output.path(), REMUXED).await?;
        Ok(output)
    }
}

/// Test application: server plus the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub repo: InMemoryVideoRepository,
    pub store: Arc<InMemory>,
    pub jwt: JwtService,
    pub scratch: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a fresh video record owned by `user_id`.
    pub async fn create_video(&self, user_id: Uuid) -> Video {
        let video = Video::new(user_id, "Boots", "A pair of boots");
        self.repo.insert(video.clone()).await;
        video
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.jwt
            .issue(user_id, chrono::Duration::hours(1))
            .expect("sign test token")
    }

    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.scratch.path())
            .expect("read scratch dir")
            .count()
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(FakeProbe::Video(1920, 1080))
}

pub fn setup_test_app_with(probe: FakeProbe) -> TestApp {
    let scratch = tempfile::tempdir().expect("create scratch dir");
    let repo = InMemoryVideoRepository::new();
    let store = Arc::new(InMemory::new());

    let storage = S3Storage::with_store(
        store.clone(),
        "tubely-test".to_string(),
        PublicUrlResolver::Cdn {
            host: "cdn.example.com".to_string(),
        },
    );
    let media = FakeMediaTool {
        probe,
        scratch_dir: scratch.path().to_path_buf(),
    };
    let settings = UploadSettings {
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        scratch_dir: scratch.path().to_path_buf(),
    };

    let pipeline = UploadPipeline::new(
        Arc::new(repo.clone()),
        Arc::new(storage),
        Arc::new(media),
        settings,
    );
    let jwt = JwtService::new(TEST_JWT_SECRET);
    let state = Arc::new(AppState::new(pipeline, jwt.clone()));

    let server = TestServer::new(routes::setup_routes(state)).expect("start test server");

    TestApp {
        server,
        repo,
        store,
        jwt,
        scratch,
    }
}

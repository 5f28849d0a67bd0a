//! Application state shared by handlers and middleware.

use crate::auth::JwtService;
use std::sync::Arc;
use tubely_processing::UploadPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<UploadPipeline>,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(pipeline: UploadPipeline, jwt: JwtService) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            jwt,
        }
    }
}

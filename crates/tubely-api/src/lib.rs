//! Tubely API Library
//!
//! This crate provides the HTTP handlers, authentication and application setup
//! for the video upload service.

mod api_doc;
mod handlers;
pub mod setup;
mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;

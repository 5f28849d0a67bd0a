//! Database repositories for the data access layer
//!
//! The upload pipeline talks to storage of video records only through the
//! [`VideoRepository`] trait. [`PgVideoRepository`] backs it with PostgreSQL;
//! [`InMemoryVideoRepository`] keeps records in a map for tests and local demos.

pub mod pool;
pub mod video;

pub use pool::{connect, run_migrations};
pub use video::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};

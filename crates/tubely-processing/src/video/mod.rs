//! ffprobe/ffmpeg integration.

mod command;
pub mod probe;
pub mod remux;
mod tool;

pub use probe::parse_probe_output;
pub use tool::{FfmpegMediaTool, MediaTool};

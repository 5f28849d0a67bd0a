//! Child process runner shared by the probe and remux stages.

use std::ffi::OsString;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::error::MediaToolError;

/// Run `program` to completion and return its output.
///
/// A non-zero exit is an error carrying the tool's stderr. When `timeout`
/// elapses the child is killed (`kill_on_drop`) and a timeout error is returned.
pub(crate) async fn run_tool(
    tool: &'static str,
    program: &str,
    args: &[OsString],
    timeout: Option<Duration>,
) -> Result<Output, MediaToolError> {
    tracing::debug!(tool, program, ?args, "Running media tool");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| MediaToolError::Spawn { tool, source })?;

    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(
                    tool,
                    timeout_secs = limit.as_secs(),
                    "Media tool timed out, killing process"
                );
                return Err(MediaToolError::Timeout {
                    tool,
                    secs: limit.as_secs(),
                });
            }
        },
        None => child.wait_with_output().await?,
    };

    if !output.status.success() {
        return Err(MediaToolError::NonZeroExit {
            tool,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

//! External tool invocation.
//!
//! Every non-trivial operation in this pipeline (style compilation, script
//! bundling, application packaging, version control) is delegated to an
//! external subprocess. Tools are located with `which` before spawning and a
//! non-zero exit carries the tool's stderr verbatim.

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Locates an external tool on PATH.
///
/// # Errors
///
/// Returns [`Error::ToolMissing`] when the tool is not installed.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::ToolMissing {
        tool: name.to_string(),
    })
}

/// Runs an external tool to completion, failing on non-zero exit.
///
/// Output is captured rather than streamed; on failure the captured stderr
/// becomes part of the error so compiler and packager diagnostics propagate
/// verbatim.
pub async fn run<I, S>(tool: &str, args: I, cwd: Option<&Path>) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = require_tool(tool)?;

    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    log::debug!("running `{tool}`");
    let output = command.output().await?;

    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool: tool.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        log::debug!("`{tool}` stdout: {}", stdout.trim());
    }

    Ok(())
}

//! Windows driver placement.

use crate::config::ProjectConfig;
use crate::dist::StepOutcome;
use crate::dist::target::{Os, PlatformTarget};
use crate::error::Result;
use crate::util::fs::copy_file;
use std::path::Path;

/// Copies the driver definition file to the bundle top level so users can
/// find it. Applies to Windows targets only; other platforms are reported
/// as skipped and no files are touched.
pub async fn place_driver(
    config: &ProjectConfig,
    target: &PlatformTarget,
    bundle: &Path,
) -> Result<StepOutcome> {
    if target.os != Os::Win32 {
        return Ok(StepOutcome::Skipped);
    }

    let source = config.root.join(&config.driver_file);
    let file_name = source
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("driver file path has no file name: {}", source.display()))?
        .to_os_string();
    copy_file(&source, &bundle.join(file_name)).await?;
    Ok(StepOutcome::Completed)
}

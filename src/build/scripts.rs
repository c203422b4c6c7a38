//! Script tree copying.

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::util::fs::copy_dir;

/// Copies the script source tree verbatim into the Build Tree, preserving
/// paths relative to the project root.
pub async fn copy_scripts(config: &ProjectConfig) -> Result<()> {
    let source = config.root.join(&config.javascripts_dir);
    let dest = config.build_path().join(&config.javascripts_dir);
    copy_dir(&source, &dest).await
}

//! Static asset copying.

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::util::fs::copy_globs;

/// Copies the fixed static asset set (binaries, fonts, images, manifest,
/// localization catalogs) verbatim into the Build Tree.
pub async fn copy_assets(config: &ProjectConfig) -> Result<()> {
    copy_globs(&config.root, &config.asset_globs, &config.build_path()).await
}

//! License aggregation.
//!
//! Builds the `ACKNOWLEDGEMENTS` document inside a packaged bundle: the
//! bundled runtime's license first (framed with its name and repository),
//! then one block per declared dependency in manifest declaration order.
//! The project's own license is copied unmodified into the bundle
//! afterwards. A missing license file anywhere is fatal.

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::manifest::{self, Manifest};
use crate::util::fs::copy_file;
use std::path::Path;
use tokio::fs;

const RUNTIME_HEADER: &str = "ELECTRON\nhttps://github.com/atom/electron\n\n";

/// Writes the acknowledgements document into the bundle and copies the
/// project license alongside.
///
/// The runtime's license is read from the bundle top level (where the
/// packager leaves it) before the project license overwrites that slot, so
/// ordering within this function is load-bearing.
pub async fn aggregate_licenses(
    config: &ProjectConfig,
    manifest: &Manifest,
    bundle: &Path,
) -> Result<()> {
    let runtime_license = fs::read_to_string(bundle.join("LICENSE")).await?;

    let mut document = String::new();
    document.push_str(RUNTIME_HEADER);
    document.push_str(&runtime_license);
    document.push_str("\n\n");

    let node_modules = config.node_modules_path();
    for dependency in manifest.dependency_names() {
        let url = manifest::repository_url(&node_modules, dependency)?;
        let text = fs::read_to_string(node_modules.join(dependency).join("LICENSE")).await?;

        document.push_str(dependency);
        document.push('\n');
        document.push_str(&url);
        document.push_str("\n\n");
        document.push_str(&text);
        document.push_str("\n\n");
    }

    fs::write(bundle.join("ACKNOWLEDGEMENTS"), document).await?;

    copy_file(&config.root.join("LICENSE"), &bundle.join("LICENSE")).await?;
    Ok(())
}

//! Stylesheet compilation.
//!
//! Delegates to the external `sass` compiler, emitting CSS and source maps
//! into `build/stylesheets`. Compiler errors propagate verbatim.

use crate::build::livereload::ReloadHandle;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::process;
use tokio::fs;

/// Compiles the stylesheet source tree into the Build Tree.
///
/// When a watcher is active, signals connected live-reload clients after a
/// successful compile.
pub async fn build_styles(
    config: &ProjectConfig,
    reload: Option<&ReloadHandle>,
) -> Result<()> {
    let source = config.root.join(&config.sass_dir);
    let out = config.build_path().join("stylesheets");
    fs::create_dir_all(&out).await?;

    process::run(
        "sass",
        [
            "--source-map".to_string(),
            format!("{}:{}", source.display(), out.display()),
        ],
        Some(&config.root),
    )
    .await?;

    if let Some(handle) = reload {
        handle.reload("stylesheets");
    }
    Ok(())
}

//! Build orchestration.
//!
//! Populates the Build Tree from the source trees. The five sub-builders
//! write disjoint subtrees and therefore run as one parallel group with no
//! ordering constraints among themselves; the orchestrator completes only
//! when all five complete and any failure aborts the whole build.

pub mod assets;
pub mod html;
pub mod livereload;
pub mod modules;
pub mod scripts;
pub mod styles;

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::tasks::TaskGraph;
use livereload::ReloadHandle;
use std::sync::Arc;

/// Runs the full build: styles, HTML resolution, script copy, dependency
/// bundling and static assets, all in parallel.
///
/// Must not run before `clean` removed any stale Build Tree; the
/// distribution orchestrator sequences that.
pub async fn run(
    config: Arc<ProjectConfig>,
    manifest: Arc<Manifest>,
    reload: Option<ReloadHandle>,
) -> Result<()> {
    let mut graph = TaskGraph::new();

    {
        let config = config.clone();
        graph.add("build:sass", async move {
            styles::build_styles(&config, reload.as_ref()).await
        })?;
    }
    {
        let config = config.clone();
        graph.add("build:html", async move { html::build_html(&config).await })?;
    }
    {
        let config = config.clone();
        graph.add("build:scripts", async move {
            scripts::copy_scripts(&config).await
        })?;
    }
    {
        let config = config.clone();
        graph.add("build:modules", async move {
            modules::bundle_modules(&config, &manifest).await
        })?;
    }
    graph.add("build:etc", async move { assets::copy_assets(&config).await })?;

    graph.run().await
}

//! Command line interface.

mod args;
mod output;

pub use args::{Args, Command};
pub use output::OutputManager;

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::{build, dist, l10n, notifier, version, watch};
use std::sync::Arc;

/// Main CLI entry point.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(args.verbose);
    let output = OutputManager::new();
    let config = Arc::new(ProjectConfig::load(&args.root)?);

    match args.command {
        Command::Build => {
            output.progress("building");
            let manifest = load_manifest(&config)?;
            build::run(config, manifest, None).await?;
            output.success("build tree populated");
        }
        Command::Clean => {
            dist::clean(&config).await?;
            output.success("build and dist removed");
        }
        Command::Cleanbuild => {
            dist::clean(&config).await?;
            output.progress("building");
            let manifest = load_manifest(&config)?;
            build::run(config, manifest, None).await?;
            output.success("build tree populated");
        }
        Command::Dist => {
            output.progress("building distributables for every target");
            let manifest = load_manifest(&config)?;
            dist::run(config.clone(), manifest).await?;
            output.success(&format!(
                "packaged {} target(s) into {}",
                config.targets.len(),
                config.dist_dir.display()
            ));
        }
        Command::Bump { level } => {
            let next = version::bump(&config, level).await?;
            output.success(&format!("bumped to {next}, committed and tagged"));
        }
        Command::L10n => {
            l10n::run(&config).await?;
            output.success("localization catalogs updated");
        }
        Command::Watch { addr } => {
            output.progress(&format!("watching stylesheets, live-reload on {addr}"));
            watch::run(config, &addr).await?;
        }
        Command::Notify => {
            notifier::notify_done(&config.app_name, "done!!").await;
        }
    }

    Ok(0)
}

/// Shows per-task progress lines at `info` level when `--verbose` is set;
/// `RUST_LOG` still takes precedence.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn load_manifest(config: &ProjectConfig) -> Result<Arc<Manifest>> {
    Ok(Arc::new(Manifest::load(&config.manifest_path())?))
}

//! Stylesheet watch mode.
//!
//! Watches the stylesheet source tree, recompiles on change and signals
//! connected live-reload clients. Compile failures are logged and the
//! watcher keeps running; only watcher setup errors are fatal.

use crate::build::livereload::ReloadServer;
use crate::build::styles;
use crate::config::ProjectConfig;
use crate::error::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::sync::Arc;
use std::time::Duration;

/// Runs watch mode until interrupted.
pub async fn run(config: Arc<ProjectConfig>, addr: &str) -> Result<()> {
    let server = ReloadServer::bind(addr).await?;
    let handle = server.handle();

    // Initial compile so clients start from a current build tree.
    styles::build_styles(&config, Some(&handle)).await?;

    let (sender, mut receiver) = tokio::sync::mpsc::channel::<Event>(64);
    let mut watcher = notify::recommended_watcher(
        move |result: std::result::Result<Event, notify::Error>| match result {
            Ok(event) => {
                let _ = sender.blocking_send(event);
            }
            Err(e) => log::warn!("watch error: {e}"),
        },
    )?;
    watcher.watch(&config.root.join(&config.sass_dir), RecursiveMode::Recursive)?;

    log::info!("watching `{}` for changes", config.sass_dir.display());
    while let Some(event) = receiver.recv().await {
        if !is_relevant(&event.kind) {
            continue;
        }

        // Editors fire bursts of events per save; coalesce them.
        tokio::time::sleep(Duration::from_millis(100)).await;
        while receiver.try_recv().is_ok() {}

        match styles::build_styles(&config, Some(&handle)).await {
            Ok(()) => log::info!("stylesheets rebuilt"),
            Err(e) => log::error!("stylesheet rebuild failed: {e}"),
        }
    }
    Ok(())
}

fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

//! irkit-build - task orchestration for the IRKit Updater desktop app.
//!
//! This binary builds the app's Build Tree and packages per-platform zip
//! distributables, delegating compilation, bundling and packaging to
//! external tools.

use std::process;

#[tokio::main]
async fn main() {
    // Run CLI and get exit code
    let exit_code = match irkit_build::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            irkit_build::cli::OutputManager::new().error(&e.to_string());
            1
        }
    };

    process::exit(exit_code);
}

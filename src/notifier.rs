//! Completion notification.
//!
//! Advisory by design: the pipeline's result is the artifacts on disk, so a
//! failed notification is logged and swallowed rather than failing a run
//! that already succeeded.

use crate::process;

/// Sends a desktop notification via the platform notifier command, falling
/// back to a log line when none is installed.
pub async fn notify_done(title: &str, message: &str) {
    let result = if cfg!(target_os = "macos") && process::require_tool("osascript").is_ok() {
        let script = format!(
            "display notification \"{message}\" with title \"{title}\" sound name \"Submarine\""
        );
        process::run("osascript", ["-e".to_string(), script], None).await
    } else if process::require_tool("notify-send").is_ok() {
        process::run(
            "notify-send",
            [title.to_string(), message.to_string()],
            None,
        )
        .await
    } else {
        log::info!("{title}: {message}");
        return;
    };

    if let Err(e) = result {
        log::warn!("completion notification failed: {e}");
    }
}

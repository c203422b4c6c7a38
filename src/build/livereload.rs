//! Live-reload signaling for watch mode.
//!
//! A minimal TCP broadcaster: connected clients receive one newline-framed
//! JSON message per reload signal. Only active while `watch` runs; the
//! build tasks take an optional handle and signal it when present.

use crate::error::Result;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

/// Sending side of the reload channel, cheap to clone into build tasks.
#[derive(Clone)]
pub struct ReloadHandle {
    sender: broadcast::Sender<String>,
}

impl ReloadHandle {
    /// Signals connected clients that `path` changed.
    ///
    /// Lossy by design: with no client connected the signal is dropped.
    pub fn reload(&self, path: &str) {
        let message = serde_json::json!({ "command": "reload", "path": path }).to_string();
        let receivers = self.sender.send(message).unwrap_or(0);
        log::debug!("reload signal for `{path}` reached {receivers} client(s)");
    }
}

/// Accepts client connections and fans reload signals out to them.
pub struct ReloadServer {
    handle: ReloadHandle,
    local_addr: SocketAddr,
}

impl ReloadServer {
    /// Binds the broadcaster and starts accepting clients.
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let (sender, _) = broadcast::channel(16);
        let handle = ReloadHandle {
            sender: sender.clone(),
        };

        tokio::spawn(async move {
            loop {
                let (mut socket, peer) = match listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        log::warn!("live-reload accept failed: {e}");
                        continue;
                    }
                };
                log::info!("live-reload client connected: {peer}");
                let mut receiver = sender.subscribe();
                tokio::spawn(async move {
                    while let Ok(message) = receiver.recv().await {
                        let framed = format!("{message}\n");
                        if socket.write_all(framed.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                });
            }
        });

        log::info!("live-reload listening on {local_addr}");
        Ok(ReloadServer { handle, local_addr })
    }

    /// Returns a handle build tasks can signal.
    pub fn handle(&self) -> ReloadHandle {
        self.handle.clone()
    }

    /// The bound address (useful when binding port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

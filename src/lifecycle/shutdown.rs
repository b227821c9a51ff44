//! Stopping the to-do server.
//!
//! The store lives only in memory, so a triggered shutdown discards every
//! user and todo once in-flight requests have drained.

use tokio::sync::broadcast;

/// Stop signal handed to `HttpServer::run`.
///
/// `lifecycle::startup` triggers it on SIGINT or SIGTERM. Integration tests
/// trigger it when their `TestServer` is dropped.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every running server to stop accepting and drain. A trigger with
    /// no subscribers is dropped.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Subscribers still waiting.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

//! Debounced persistence of popup window geometry.
//!
//! Resize/move events arrive in bursts. Only the last bounds of a burst are
//! written, once no new event has arrived for the quiet period.

use std::sync::Arc;
use std::time::Duration;

use casejump_core::WindowBounds;
use casejump_store::{KvBackend, StateStore};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

pub struct BoundsSaver {
    tx: mpsc::UnboundedSender<WindowBounds>,
    task: JoinHandle<()>,
}

impl BoundsSaver {
    /// Start the saver task. Must be called inside a tokio runtime.
    pub fn spawn<B: KvBackend + 'static>(store: Arc<StateStore<B>>, quiet: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(store, quiet, rx));
        Self { tx, task }
    }

    pub fn changed(&self, bounds: WindowBounds) {
        if self.tx.send(bounds).is_err() {
            warn!("bounds saver stopped, change dropped");
        }
    }

    /// Stop accepting changes and write any bounds still waiting.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            warn!(error = %e, "bounds saver task failed");
        }
    }
}

async fn run<B: KvBackend>(
    store: Arc<StateStore<B>>,
    quiet: Duration,
    mut rx: mpsc::UnboundedReceiver<WindowBounds>,
) {
    let mut waiting: Option<WindowBounds> = None;
    loop {
        match waiting {
            None => match rx.recv().await {
                Some(bounds) => waiting = Some(bounds),
                None => return,
            },
            Some(bounds) => {
                tokio::select! {
                    next = rx.recv() => match next {
                        Some(newer) => waiting = Some(newer),
                        None => {
                            save(&store, bounds).await;
                            return;
                        }
                    },
                    _ = tokio::time::sleep(quiet) => {
                        save(&store, bounds).await;
                        waiting = None;
                    }
                }
            }
        }
    }
}

async fn save<B: KvBackend>(store: &StateStore<B>, bounds: WindowBounds) {
    if let Err(e) = store.save_window_bounds(&bounds).await {
        warn!(error = %e, "failed to persist window bounds");
    }
}

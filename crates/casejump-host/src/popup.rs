//! The single persistent popup window.

use async_trait::async_trait;
use casejump_core::WindowBounds;
use tracing::{debug, info};

use crate::HostError;

pub type WindowId = u64;

/// Whatever actually draws windows (browser API, terminal, test double).
#[async_trait]
pub trait PopupSurface: Send + Sync {
    async fn create(&self, url: &str, bounds: WindowBounds) -> Result<WindowId, HostError>;

    /// Point an existing window at `url`. Fails if the window is gone.
    async fn navigate(&self, window: WindowId, url: &str) -> Result<(), HostError>;
}

/// Keeps at most one popup open and reuses it for every lookup.
pub struct PopupController<S> {
    surface: S,
    window: Option<WindowId>,
}

impl<S: PopupSurface> PopupController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            window: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn current(&self) -> Option<WindowId> {
        self.window
    }

    /// Show `url`, reusing the open popup when there is one. `bounds` only
    /// applies when a new window has to be created.
    pub async fn open(&mut self, url: &str, bounds: WindowBounds) -> Result<WindowId, HostError> {
        if let Some(id) = self.window {
            match self.surface.navigate(id, url).await {
                Ok(()) => {
                    debug!(window = id, url, "popup reused");
                    return Ok(id);
                }
                Err(e) => {
                    debug!(window = id, error = %e, "popup gone, creating a new one");
                    self.window = None;
                }
            }
        }
        let id = self.surface.create(url, bounds).await?;
        info!(window = id, url, ?bounds, "popup created");
        self.window = Some(id);
        Ok(id)
    }

    /// Send a specific window elsewhere (used for fallback redirects).
    pub async fn navigate(&self, window: WindowId, url: &str) -> Result<(), HostError> {
        self.surface.navigate(window, url).await
    }

    pub fn window_closed(&mut self, id: WindowId) {
        if self.window == Some(id) {
            debug!(window = id, "popup closed");
            self.window = None;
        }
    }
}

//! Popup surface for a terminal: there is no window to drive, so each
//! navigation is reported on stderr and windows are plain counters.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use casejump_core::WindowBounds;
use casejump_host::{HostError, PopupSurface, WindowId};
use tracing::info;

#[derive(Debug, Default)]
pub struct TerminalSurface {
    next_id: AtomicU64,
}

#[async_trait]
impl PopupSurface for TerminalSurface {
    async fn create(&self, url: &str, bounds: WindowBounds) -> Result<WindowId, HostError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            window = id,
            url,
            left = bounds.left,
            top = bounds.top,
            width = bounds.width,
            height = bounds.height,
            "popup opened"
        );
        Ok(id)
    }

    async fn navigate(&self, window: WindowId, url: &str) -> Result<(), HostError> {
        info!(window, url, "popup navigated");
        Ok(())
    }
}

//! Typed access to persisted state.
//!
//! Every read validates and default-fills: a missing or malformed value is
//! replaced by its default rather than failing the operation.

use std::collections::BTreeMap;

use casejump_core::{HistoryEntry, HistoryList, Settings, WindowBounds};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{KvBackend, StoreError};

/// Storage keys.
pub mod keys {
    pub const SETTINGS: &str = "settings";
    pub const FAVORITE_LAWS: &str = "favoriteLaws";
    pub const HISTORY: &str = "history";
    pub const WINDOW_BOUNDS: &str = "windowBounds";
}

/// Typed facade over a [`KvBackend`].
pub struct StateStore<B> {
    backend: B,
}

impl<B: KvBackend> StateStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(value) = self.backend.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                warn!(key, error = %e, "discarding malformed stored value");
                Ok(None)
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.backend.set(key, serde_json::to_value(value)?).await
    }

    // ── Settings ──

    pub async fn settings(&self) -> Result<Settings, StoreError> {
        let enabled: Option<BTreeMap<String, bool>> = self.read(keys::SETTINGS).await?;
        let favorites: Option<Vec<String>> = self.read(keys::FAVORITE_LAWS).await?;
        let defaults = Settings::default();
        Ok(Settings::sanitized(
            enabled.unwrap_or(defaults.enabled),
            favorites.unwrap_or(defaults.favorites),
        ))
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.write(keys::SETTINGS, &settings.enabled).await?;
        self.write(keys::FAVORITE_LAWS, &settings.favorites).await?;
        info!(
            enabled = settings.enabled.values().filter(|v| **v).count(),
            favorites = settings.favorites.len(),
            "settings saved"
        );
        Ok(())
    }

    // ── Popup geometry ──

    pub async fn window_bounds(&self) -> Result<Option<WindowBounds>, StoreError> {
        self.read(keys::WINDOW_BOUNDS).await
    }

    pub async fn save_window_bounds(&self, bounds: &WindowBounds) -> Result<(), StoreError> {
        self.write(keys::WINDOW_BOUNDS, bounds).await?;
        debug!(?bounds, "window bounds saved");
        Ok(())
    }

    // ── History ──

    pub fn history(&self) -> HistoryStore<'_, B> {
        HistoryStore { store: self }
    }
}

/// Read-modify-write operations on the persisted history list.
///
/// Each operation reads the whole list, changes it, and writes it back.
/// Concurrent operations are not serialised against each other.
pub struct HistoryStore<'a, B> {
    store: &'a StateStore<B>,
}

impl<B: KvBackend> HistoryStore<'_, B> {
    /// Most recent first.
    pub async fn list(&self) -> Result<HistoryList, StoreError> {
        let entries: Option<Vec<HistoryEntry>> = self.store.read(keys::HISTORY).await?;
        Ok(HistoryList::from_entries(entries.unwrap_or_default()))
    }

    async fn save(&self, list: &HistoryList) -> Result<(), StoreError> {
        self.store.write(keys::HISTORY, list).await
    }

    pub async fn record(&self, entry: HistoryEntry) -> Result<(), StoreError> {
        let mut list = self.list().await?;
        info!(url = %entry.url, label = %entry.display_text, "recording history entry");
        list.record(entry);
        self.save(&list).await
    }

    /// Remove the entry at `index`; out-of-range indices change nothing.
    pub async fn remove(&self, index: usize) -> Result<Option<HistoryEntry>, StoreError> {
        let mut list = self.list().await?;
        let removed = list.remove(index);
        if removed.is_some() {
            self.save(&list).await?;
        }
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.save(&HistoryList::default()).await
    }

    /// Replace the label of the entry for `url`. Skips the write when nothing
    /// changed. Returns whether a write happened.
    pub async fn update_title(&self, url: &str, new_title: &str) -> Result<bool, StoreError> {
        let mut list = self.list().await?;
        if !list.update_title(url, new_title) {
            return Ok(false);
        }
        debug!(url, title = new_title, "history title updated");
        self.save(&list).await?;
        Ok(true)
    }
}

//! User configuration: which statutes appear in the menu and which are
//! pinned as favorites.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::catalog::{LAWS, LawEntry, find_law};

pub const MAX_FAVORITES: usize = 3;

/// Statutes enabled on first run.
pub const DEFAULT_ENABLED: &[&str] = &["civilLaw", "constitution", "criminalLaw"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// law id → enabled
    pub enabled: BTreeMap<String, bool>,
    /// Ordered, at most [`MAX_FAVORITES`].
    pub favorites: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_ENABLED
                .iter()
                .map(|id| (id.to_string(), true))
                .collect(),
            favorites: Vec::new(),
        }
    }
}

impl Settings {
    /// Build settings from stored values, dropping unknown law ids,
    /// duplicate favorites, and favorites past the cap.
    pub fn sanitized(enabled: BTreeMap<String, bool>, favorites: Vec<String>) -> Self {
        let enabled = enabled
            .into_iter()
            .filter(|(id, _)| find_law(id).is_some())
            .collect();

        let mut kept: Vec<String> = Vec::with_capacity(MAX_FAVORITES);
        for id in favorites {
            if kept.len() == MAX_FAVORITES {
                break;
            }
            if find_law(&id).is_some() && !kept.contains(&id) {
                kept.push(id);
            }
        }

        Self {
            enabled,
            favorites: kept,
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.get(id).copied().unwrap_or(false)
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), CoreError> {
        let law = find_law(id).ok_or_else(|| CoreError::UnknownLaw(id.to_string()))?;
        self.enabled.insert(law.id.to_string(), enabled);
        Ok(())
    }

    /// Add or remove `id` from the favorites. Returns whether it is now a
    /// favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, CoreError> {
        let law = find_law(id).ok_or_else(|| CoreError::UnknownLaw(id.to_string()))?;
        if let Some(pos) = self.favorites.iter().position(|f| f == law.id) {
            self.favorites.remove(pos);
            return Ok(false);
        }
        if self.favorites.len() >= MAX_FAVORITES {
            return Err(CoreError::FavoritesFull { max: MAX_FAVORITES });
        }
        self.favorites.push(law.id.to_string());
        Ok(true)
    }

    /// Enabled statutes in catalog order.
    pub fn enabled_laws(&self) -> impl Iterator<Item = &'static LawEntry> + '_ {
        LAWS.iter().filter(|l| self.is_enabled(l.id))
    }

    /// Favorite statutes in favorite order.
    pub fn favorite_laws(&self) -> impl Iterator<Item = &'static LawEntry> + '_ {
        self.favorites.iter().filter_map(|id| find_law(id))
    }
}

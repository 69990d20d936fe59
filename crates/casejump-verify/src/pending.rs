//! Post-navigation verification.
//!
//! The candidate page is opened straight away and a pending check is parked
//! under the tab that shows it. When that tab reports the loaded page, the
//! check resolves to either "keep it" or "go to the fallback instead".
//! Closing the tab or navigating it elsewhere drops the check silently.

use std::collections::HashMap;

use casejump_core::history::normalize_url;
use casejump_core::page::is_error_title;
use casejump_core::{HistoryEntry, ResolvedTarget};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Browser tab (or popup window) identifier.
pub type TabId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheck {
    pub target: ResolvedTarget,
    pub registered_at: DateTime<Utc>,
}

/// Result of a page-loaded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The candidate exists; record it.
    Commit(HistoryEntry),
    /// The candidate is the site's error page; navigate to `url` and record
    /// `entry`.
    Redirect { url: String, entry: HistoryEntry },
    /// Nothing pending for this tab and page.
    Untracked,
}

/// Tab id → pending check. Owned by the host for the life of the process.
#[derive(Debug, Default)]
pub struct PendingVerifications {
    checks: HashMap<TabId, PendingCheck>,
}

impl PendingVerifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn get(&self, tab: TabId) -> Option<&PendingCheck> {
        self.checks.get(&tab)
    }

    /// Park a check for `tab`, replacing (and returning) any earlier one.
    pub fn register(&mut self, tab: TabId, target: ResolvedTarget) -> Option<PendingCheck> {
        debug!(tab, url = %target.candidate_url, "pending verification registered");
        self.checks.insert(
            tab,
            PendingCheck {
                target,
                registered_at: Utc::now(),
            },
        )
    }

    /// Resolve the check for `tab` from the page it loaded.
    ///
    /// A page other than the candidate means the user navigated away: the
    /// check is dropped and nothing is recorded. The candidate with a
    /// trailing slash or a fragment still counts as the candidate.
    pub fn page_loaded(&mut self, tab: TabId, url: &str, title: &str) -> PageOutcome {
        let Some(check) = self.checks.remove(&tab) else {
            return PageOutcome::Untracked;
        };
        let target = check.target;
        if !same_page(url, &target.candidate_url) {
            debug!(tab, url, "tab left the candidate page, check dropped");
            return PageOutcome::Untracked;
        }

        let waited_ms = (Utc::now() - check.registered_at).num_milliseconds();
        if is_error_title(title) {
            debug!(tab, waited_ms, fallback = %target.fallback_url, "candidate is an error page");
            PageOutcome::Redirect {
                entry: HistoryEntry::new(&target.fallback_url, &target.fallback_label),
                url: target.fallback_url,
            }
        } else {
            debug!(tab, waited_ms, "candidate page confirmed");
            PageOutcome::Commit(HistoryEntry::new(
                target.candidate_url,
                target.display_label,
            ))
        }
    }

    /// Drop the check for a closed tab. Returns whether one existed.
    pub fn tab_closed(&mut self, tab: TabId) -> bool {
        let dropped = self.checks.remove(&tab).is_some();
        if dropped {
            debug!(tab, "tab closed, pending verification dropped");
        }
        dropped
    }
}

/// Compare decoded URLs, ignoring a fragment and a trailing slash.
fn same_page(a: &str, b: &str) -> bool {
    fn canonical(url: &str) -> String {
        let decoded = normalize_url(url);
        let without_fragment = decoded.split('#').next().unwrap_or_default();
        without_fragment.trim_end_matches('/').to_string()
    }
    canonical(a) == canonical(b)
}

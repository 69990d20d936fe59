//! Pre-navigation verification: probe the candidate, pick candidate or
//! fallback.

use std::time::Duration;

use casejump_core::{HistoryEntry, ResolvedTarget};
use tracing::{info, warn};

use crate::{ExistenceProbe, VerifyError};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a particular URL was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The target needs no check (statute page or search page).
    NotRequired,
    /// The probe answered 200.
    Confirmed,
    /// Non-200 answer, probe error, or timeout.
    FellBack { reason: String },
}

/// The URL to open and the history entry to record for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub url: String,
    pub label: String,
    pub outcome: Outcome,
}

impl Verdict {
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry::new(&self.url, &self.label)
    }

    fn candidate(target: &ResolvedTarget, outcome: Outcome) -> Self {
        Self {
            url: target.candidate_url.clone(),
            label: target.display_label.clone(),
            outcome,
        }
    }

    fn fallback(target: &ResolvedTarget, reason: String) -> Self {
        Self {
            url: target.fallback_url.clone(),
            label: target.fallback_label.clone(),
            outcome: Outcome::FellBack { reason },
        }
    }
}

/// Probe-based verifier. Any failure to confirm means "use the fallback".
pub struct ExistenceVerifier<P> {
    probe: P,
    deadline: Duration,
}

impl<P: ExistenceProbe> ExistenceVerifier<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            deadline: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Give up on the probe after `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub async fn verify(&self, target: &ResolvedTarget) -> Verdict {
        if !target.requires_verification {
            return Verdict::candidate(target, Outcome::NotRequired);
        }

        let probe = self.probe.status(&target.candidate_url);
        let result = tokio::time::timeout(self.deadline, probe)
            .await
            .unwrap_or(Err(VerifyError::Timeout(self.deadline)));

        match result {
            Ok(200) => {
                info!(url = %target.candidate_url, "target confirmed");
                Verdict::candidate(target, Outcome::Confirmed)
            }
            Ok(status) => {
                info!(
                    url = %target.candidate_url,
                    status,
                    "target missing, falling back to search"
                );
                Verdict::fallback(target, format!("status {status}"))
            }
            Err(e) => {
                warn!(
                    url = %target.candidate_url,
                    error = %e,
                    "probe failed, falling back to search"
                );
                Verdict::fallback(target, e.to_string())
            }
        }
    }
}

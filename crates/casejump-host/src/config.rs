//! Host configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use casejump_core::DisplayArea;
use casejump_core::resolve::DEFAULT_SITE;
use casejump_verify::DEFAULT_PROBE_TIMEOUT;

/// How directly-addressed precedent targets are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyStrategy {
    /// `HEAD` the candidate before opening anything.
    #[default]
    Probe,
    /// Open the candidate, then inspect the page the tab reports.
    PostNavigation,
}

impl FromStr for VerifyStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "probe" => Ok(Self::Probe),
            "post-navigation" => Ok(Self::PostNavigation),
            other => Err(format!(
                "unknown strategy {other:?} (expected \"probe\" or \"post-navigation\")"
            )),
        }
    }
}

impl fmt::Display for VerifyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Probe => "probe",
            Self::PostNavigation => "post-navigation",
        })
    }
}

pub const DEFAULT_BOUNDS_QUIET: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Destination site base URL, no trailing slash.
    pub site: String,
    pub strategy: VerifyStrategy,
    pub probe_timeout: Duration,
    /// Primary display work area used for popup placement.
    pub display: DisplayArea,
    /// Quiet period before a window-bounds change is persisted.
    pub bounds_quiet: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.to_string(),
            strategy: VerifyStrategy::Probe,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            display: DisplayArea {
                width: 1920,
                height: 1080,
            },
            bounds_quiet: DEFAULT_BOUNDS_QUIET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_parses() {
        assert_eq!("probe".parse(), Ok(VerifyStrategy::Probe));
        assert_eq!("post-navigation".parse(), Ok(VerifyStrategy::PostNavigation));
        assert!("eager".parse::<VerifyStrategy>().is_err());
        assert_eq!(VerifyStrategy::PostNavigation.to_string(), "post-navigation");
    }
}

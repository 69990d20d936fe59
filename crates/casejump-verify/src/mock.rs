//! Scripted probe for tests and offline runs.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::{ExistenceProbe, VerifyError};

/// Answers from a fixed URL → status table; unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct StaticProbe {
    statuses: HashMap<String, u16>,
    fail: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }

    /// Every probe returns an error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs probed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ExistenceProbe for StaticProbe {
    async fn status(&self, url: &str) -> Result<u16, VerifyError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(VerifyError::Other("scripted probe failure".into()));
        }
        Ok(self.statuses.get(url).copied().unwrap_or(404))
    }
}

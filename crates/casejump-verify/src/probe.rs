//! Network existence probes.

use async_trait::async_trait;

use crate::VerifyError;

/// Answers "what status does this URL return?" without fetching the body.
#[async_trait]
pub trait ExistenceProbe: Send + Sync {
    async fn status(&self, url: &str) -> Result<u16, VerifyError>;
}

/// `HEAD` requests with reqwest.
#[cfg(feature = "http")]
pub struct HttpProbe {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpProbe {
    /// `timeout` bounds the whole request, connect included. Redirects are
    /// not followed: the candidate itself must answer 200.
    pub fn new(timeout: std::time::Duration) -> Result<Self, VerifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("casejump/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl ExistenceProbe for HttpProbe {
    async fn status(&self, url: &str) -> Result<u16, VerifyError> {
        tracing::info!(url = %url, "probing target");
        let resp = self.client.head(url).send().await?;
        let status = resp.status().as_u16();
        tracing::debug!(url = %url, status, "probe answered");
        Ok(status)
    }
}

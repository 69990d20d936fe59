use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[cfg(feature = "http")]
    #[error("HTTP probe failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("probe timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("{0}")]
    Other(String),
}

//! Verify-before-commit for directly-addressed targets.
//!
//! Two strategies: probe the candidate URL before navigating
//! ([`ExistenceVerifier`]), or navigate optimistically and inspect the loaded
//! page ([`PendingVerifications`]). Both fall back to full-text search when
//! the target does not exist or cannot be confirmed.

mod error;
pub mod mock;
mod pending;
mod probe;
mod verifier;

pub use error::VerifyError;
pub use pending::{PageOutcome, PendingCheck, PendingVerifications, TabId};
pub use probe::ExistenceProbe;
#[cfg(feature = "http")]
pub use probe::HttpProbe;
pub use verifier::{DEFAULT_PROBE_TIMEOUT, ExistenceVerifier, Outcome, Verdict};

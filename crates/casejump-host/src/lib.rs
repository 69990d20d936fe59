//! Host runtime: turns inbound browser events into lookups, popup
//! navigation, and state updates.

pub mod bounds;
pub mod config;
mod error;
pub mod host;
pub mod popup;
pub mod request;
pub mod session;

pub use config::{HostConfig, VerifyStrategy};
pub use error::HostError;
pub use host::{Host, Lookup};
pub use popup::{PopupController, PopupSurface, WindowId};
pub use request::{Request, Response};
pub use session::run_session;

//! Storage layer: a process-wide key-value backend (memory or JSON file) and
//! typed accessors for the state casejump persists across restarts.

mod backend;
mod error;
mod state;

pub use backend::{JsonFileBackend, KvBackend, MemoryBackend};
pub use error::StoreError;
pub use state::{HistoryStore, StateStore, keys};

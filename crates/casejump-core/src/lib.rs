//! Core types for casejump: the statute and court catalog, selection
//! classification, destination URL resolution, and the shapes of persisted
//! state (history, settings, popup geometry).

pub mod catalog;
pub mod classify;
mod error;
pub mod history;
pub mod menu;
pub mod page;
pub mod placement;
pub mod resolve;
pub mod selection;
pub mod settings;

pub use catalog::{Category, Court, CourtPattern, LawEntry, PatternCatalog, find_law};
pub use classify::{Classification, classify, classify_for_law, classify_precedent};
pub use error::CoreError;
pub use history::{HistoryEntry, HistoryList, MAX_HISTORY};
pub use page::{PageReport, inspect_page};
pub use placement::{DisplayArea, WindowBounds};
pub use resolve::{EntryPoint, ResolvedTarget, UrlResolver};
pub use selection::{ArticleToken, Selection};
pub use settings::Settings;

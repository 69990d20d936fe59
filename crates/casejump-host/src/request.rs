//! Inbound messages and their replies, as exchanged with the browser side.

use std::collections::BTreeMap;

use casejump_core::menu::MenuItem;
use casejump_core::{HistoryEntry, WindowBounds};
use casejump_verify::TabId;
use serde::{Deserialize, Serialize};

use crate::popup::WindowId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    /// Article, then precedent, then search.
    IntelligentSearch { selection: String },
    /// Precedent, then search.
    PrecedentSearch { selection: String },
    /// Article of one chosen statute, else a law-qualified search.
    DirectLawSearch { law_id: String, selection: String },
    /// A context-menu click, dispatched by item id.
    MenuClick {
        menu_item_id: String,
        selection: String,
    },
    OpenFromHistory { item: HistoryEntry },
    #[serde(alias = "updateContextMenus")]
    UpdateMenus,
    UpdateHistoryTitle { url: String, new_title: String },
    KeepAlive,
    /// A tab finished loading `url` with document title `title`.
    PageLoaded {
        tab_id: TabId,
        url: String,
        title: String,
    },
    TabClosed { tab_id: TabId },
    WindowBoundsChanged { bounds: WindowBounds },
    WindowClosed { window_id: WindowId },
    ListHistory,
    RemoveHistory { index: usize },
    ClearHistory,
    GetSettings,
    SetLawEnabled { law_id: String, enabled: bool },
    ToggleFavorite { law_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Response {
    /// `url` is showing in the popup and recorded in history.
    Opened {
        window_id: WindowId,
        url: String,
        label: String,
        verification: String,
    },
    /// The candidate is showing; history waits for the page report.
    Pending { window_id: WindowId, url: String },
    /// The reported page was the site's error page; the tab now shows `url`.
    Redirected { window_id: WindowId, url: String },
    /// Plain-language notice for an error page that had no pending check.
    NotFound { message: String },
    Menus { items: Vec<MenuItem> },
    History { entries: Vec<HistoryEntry> },
    Settings {
        enabled: BTreeMap<String, bool>,
        favorites: Vec<String>,
    },
    Ack,
    Ignored { reason: String },
    Failed { message: String },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_browser_messages() {
        let req: Request = serde_json::from_value(json!({
            "action": "intelligentSearch",
            "selection": "민법 제750조"
        }))
        .unwrap();
        assert_eq!(
            req,
            Request::IntelligentSearch {
                selection: "민법 제750조".into()
            }
        );

        let req: Request = serde_json::from_value(json!({
            "action": "updateHistoryTitle",
            "url": "https://casenote.kr/법령/민법/제750조",
            "newTitle": "민법 제750조"
        }))
        .unwrap();
        assert!(matches!(req, Request::UpdateHistoryTitle { .. }));

        let req: Request = serde_json::from_value(json!({
            "action": "openFromHistory",
            "item": {"url": "u", "displayText": "t"}
        }))
        .unwrap();
        assert_eq!(
            req,
            Request::OpenFromHistory {
                item: HistoryEntry::new("u", "t")
            }
        );
    }

    #[test]
    fn legacy_menu_update_name_accepted() {
        let req: Request = serde_json::from_value(json!({"action": "updateContextMenus"})).unwrap();
        assert_eq!(req, Request::UpdateMenus);
    }

    #[test]
    fn unknown_action_rejected() {
        assert!(serde_json::from_value::<Request>(json!({"action": "format"})).is_err());
    }

    #[test]
    fn response_shape() {
        let resp = Response::Pending {
            window_id: 4,
            url: "u".into(),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"kind": "pending", "windowId": 4, "url": "u"})
        );
    }
}

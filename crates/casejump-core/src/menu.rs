//! Context-menu tree derived from [`Settings`].
//!
//! The host hands the flat item list to whatever surface draws menus;
//! items reference their parent by id.

use serde::Serialize;

use crate::catalog::CATEGORY_ORDER;
use crate::settings::Settings;

pub const ROOT_ID: &str = "casenoteParent";
pub const INTELLIGENT_ID: &str = "intelligentSearch";
pub const PRECEDENT_ID: &str = "autoPrecedentSearch";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuKind {
    Normal,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub kind: MenuKind,
}

impl MenuItem {
    fn normal(id: impl Into<String>, parent: Option<&str>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent.map(String::from),
            title: title.into(),
            kind: MenuKind::Normal,
        }
    }

    fn separator(id: &str) -> Self {
        Self {
            id: id.to_string(),
            parent_id: Some(ROOT_ID.to_string()),
            title: String::new(),
            kind: MenuKind::Separator,
        }
    }
}

/// Menu action a clicked item id stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Intelligent,
    Precedent,
    Law(String),
}

/// Map a clicked menu item id back to its action.
///
/// Favorite items are prefixed with `fav_`; law items use the bare law id.
pub fn action_for(item_id: &str) -> Option<MenuAction> {
    match item_id {
        INTELLIGENT_ID => Some(MenuAction::Intelligent),
        PRECEDENT_ID => Some(MenuAction::Precedent),
        other => {
            let id = other.strip_prefix("fav_").unwrap_or(other);
            crate::catalog::find_law(id).map(|law| MenuAction::Law(law.id.to_string()))
        }
    }
}

pub fn build_menu(settings: &Settings) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::normal(ROOT_ID, None, "CaseNote에서 검색"),
        MenuItem::normal(INTELLIGENT_ID, Some(ROOT_ID), "지능형 검색 🧠"),
        MenuItem::separator("separator_intelligent"),
        MenuItem::normal(PRECEDENT_ID, Some(ROOT_ID), "판례 자동 검색 🏛️"),
        MenuItem::separator("separator_manual"),
    ];

    for law in settings.favorite_laws() {
        items.push(MenuItem::normal(
            format!("fav_{}", law.id),
            Some(ROOT_ID),
            format!("⭐ {} 조문 검색", law.display_name),
        ));
    }

    for category in CATEGORY_ORDER {
        let laws: Vec<_> = settings
            .enabled_laws()
            .filter(|l| l.category == category && !settings.favorites.iter().any(|f| f == l.id))
            .collect();
        if laws.is_empty() {
            continue;
        }
        let category_id = format!("category_{}", category.label());
        items.push(MenuItem::normal(&category_id, Some(ROOT_ID), category.label()));
        for law in laws {
            items.push(MenuItem::normal(
                law.id,
                Some(&category_id),
                format!("{} 조문 검색 📜", law.display_name),
            ));
        }
    }

    items
}

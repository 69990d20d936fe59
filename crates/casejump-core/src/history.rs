//! Recent-lookup list: bounded, deduplicated by URL, newest first.

use serde::{Deserialize, Serialize};

/// Entries kept after every insert.
pub const MAX_HISTORY: usize = 5;

/// One completed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub url: String,
    pub display_text: String,
}

impl HistoryEntry {
    pub fn new(url: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            display_text: display_text.into(),
        }
    }

    /// Deduplication key: the percent-decoded URL.
    pub fn key(&self) -> String {
        normalize_url(&self.url)
    }
}

/// Percent-decode `url` for comparison. URLs that do not decode to valid
/// UTF-8 compare as written.
pub fn normalize_url(url: &str) -> String {
    urlencoding::decode(url)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| url.to_string())
}

/// In-memory history list. The persisted form is a plain JSON array of
/// [`HistoryEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList {
    entries: Vec<HistoryEntry>,
}

impl HistoryList {
    /// Wrap entries read from storage, enforcing dedup and the size cap.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.key()))
            .take(MAX_HISTORY)
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Drop any entry with the same key, put `entry` at the head, truncate.
    pub fn record(&mut self, entry: HistoryEntry) {
        let key = entry.key();
        self.entries.retain(|e| e.key() != key);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY);
    }

    /// Remove the entry at `index`. Returns `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the label of the entry whose decoded URL matches `url`.
    ///
    /// Order is untouched. Returns `false` when no entry matches or the
    /// label is already `new_title`.
    pub fn update_title(&mut self, url: &str, new_title: &str) -> bool {
        let key = normalize_url(url);
        match self.entries.iter_mut().find(|e| e.key() == key) {
            Some(entry) if entry.display_text != new_title => {
                entry.display_text = new_title.to_string();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("https://casenote.kr/search/?q={n}"), n.to_string())
    }

    fn urls(list: &HistoryList) -> Vec<&str> {
        list.entries().iter().map(|e| e.url.as_str()).collect()
    }

    #[test]
    fn record_prepends() {
        let mut list = HistoryList::default();
        list.record(entry(1));
        list.record(entry(2));
        assert_eq!(list.get(0).unwrap().display_text, "2");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn repeated_record_is_idempotent() {
        let mut list = HistoryList::default();
        list.record(entry(1));
        list.record(entry(2));
        list.record(entry(2));
        assert_eq!(list.len(), 2);
        list.record(entry(1));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap(), &entry(1));
    }

    #[test]
    fn never_exceeds_cap() {
        let mut list = HistoryList::default();
        for n in 0..20 {
            list.record(entry(n));
            assert!(list.len() <= MAX_HISTORY);
        }
        assert_eq!(list.len(), MAX_HISTORY);
        assert_eq!(list.get(0).unwrap(), &entry(19));
        assert_eq!(list.get(4).unwrap(), &entry(15));
    }

    #[test]
    fn dedup_compares_decoded_urls() {
        let mut list = HistoryList::default();
        list.record(HistoryEntry::new("https://casenote.kr/대법원/2019다1", "a"));
        list.record(HistoryEntry::new(
            "https://casenote.kr/%EB%8C%80%EB%B2%95%EC%9B%90/2019%EB%8B%A41",
            "b",
        ));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().display_text, "b");
    }

    #[test]
    fn remove_by_index() {
        let mut list = HistoryList::default();
        for n in 0..3 {
            list.record(entry(n));
        }
        assert_eq!(list.remove(1), Some(entry(1)));
        assert_eq!(list.remove(7), None);
        assert_eq!(urls(&list), vec![entry(2).url, entry(0).url]);
    }

    #[test]
    fn clear_empties() {
        let mut list = HistoryList::default();
        list.record(entry(0));
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn title_update_in_place() {
        let mut list = HistoryList::default();
        for n in 0..3 {
            list.record(entry(n));
        }
        let before = urls(&list).into_iter().map(String::from).collect::<Vec<_>>();
        assert!(list.update_title(&entry(1).url, "민법 제750조"));
        assert_eq!(list.get(1).unwrap().display_text, "민법 제750조");
        assert_eq!(urls(&list), before);
    }

    #[test]
    fn title_update_noop_when_same() {
        let mut list = HistoryList::default();
        list.record(entry(1));
        assert!(!list.update_title(&entry(1).url, "1"));
        assert!(!list.update_title("https://elsewhere", "x"));
    }

    #[test]
    fn title_update_matches_encoded_url() {
        let mut list = HistoryList::default();
        list.record(HistoryEntry::new("https://casenote.kr/대법원/2019다1", "대법원 2019다1"));
        assert!(list.update_title(
            "https://casenote.kr/%EB%8C%80%EB%B2%95%EC%9B%90/2019%EB%8B%A41",
            "대법원 2019. 1. 1. 선고 2019다1 판결"
        ));
    }

    #[test]
    fn from_entries_enforces_invariants() {
        let raw: Vec<HistoryEntry> = (0..8).map(entry).chain([entry(0)]).collect();
        let list = HistoryList::from_entries(raw);
        assert_eq!(list.len(), MAX_HISTORY);
        assert_eq!(list.get(0).unwrap(), &entry(0));
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut list = HistoryList::default();
        list.record(HistoryEntry::new("u", "t"));
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"url":"u","displayText":"t"}]"#);
    }
}

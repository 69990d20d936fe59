//! Inspection of a loaded destination page, from its URL and title.

/// Title fragment the destination site uses on its not-found page.
pub const ERROR_TITLE_MARKER: &str = "에러(404)";

/// Suffix the destination site appends to every page title.
pub const TITLE_SUFFIX: &str = " - CaseNote";

/// What a loaded page tells us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageReport {
    /// The site's not-found page.
    NotFound,
    /// A real page; `title` is the cleaned title to store, if any.
    Found { title: Option<String> },
}

pub fn is_error_title(title: &str) -> bool {
    title.contains(ERROR_TITLE_MARKER)
}

pub fn is_search_page(url: &str) -> bool {
    url.contains("/search/")
}

/// Strip the site suffix and surrounding whitespace.
pub fn clean_title(title: &str) -> &str {
    title.strip_suffix(TITLE_SUFFIX).unwrap_or(title).trim()
}

/// Classify a loaded page. Search result pages never contribute a title.
pub fn inspect_page(url: &str, title: &str) -> PageReport {
    if is_error_title(title) {
        return PageReport::NotFound;
    }
    let cleaned = clean_title(title);
    let title = (!is_search_page(url) && !cleaned.is_empty()).then(|| cleaned.to_string());
    PageReport::Found { title }
}

//! Turn a [`Classification`] into destination URLs and a history label.

use crate::classify::Classification;
use crate::selection::Selection;

pub const DEFAULT_SITE: &str = "https://casenote.kr";

/// Which user action started the lookup. Decides the label used for
/// article matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    /// General lookup: article matches are labelled with the full selection.
    Intelligent,
    /// Precedent-only lookup.
    Precedent,
    /// Menu entry for one statute: article matches are labelled
    /// `"<law> <article>"`.
    DirectLaw,
}

/// Where a lookup should go, and where to go instead if the target is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub candidate_url: String,
    pub fallback_url: String,
    pub display_label: String,
    pub fallback_label: String,
    /// Only precedent targets can point at pages that do not exist.
    pub requires_verification: bool,
}

impl ResolvedTarget {
    fn unverified(url: String, label: String) -> Self {
        Self {
            candidate_url: url.clone(),
            fallback_url: url,
            display_label: label.clone(),
            fallback_label: label,
            requires_verification: false,
        }
    }
}

/// Builds destination-site URLs.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base_url: String,
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SITE)
    }
}

impl UrlResolver {
    /// `base_url` should be like `https://casenote.kr` (no trailing slash).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Free-text search URL for `query`.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}/search/?q={}", self.base_url, urlencoding::encode(query))
    }

    pub fn resolve(
        &self,
        classification: &Classification,
        selection: &Selection,
        entry: EntryPoint,
    ) -> ResolvedTarget {
        match classification {
            Classification::Article { law, article } => {
                let url = format!("{}/법령/{}/{}", self.base_url, law.url_slug, article);
                let label = match entry {
                    EntryPoint::DirectLaw => format!("{} {}", law.display_name, article),
                    EntryPoint::Intelligent | EntryPoint::Precedent => selection.to_string(),
                };
                ResolvedTarget::unverified(url, label)
            }
            Classification::Precedent { court, case_number } => ResolvedTarget {
                candidate_url: format!(
                    "{}/{}/{}",
                    self.base_url,
                    court.url_name(),
                    urlencoding::encode(case_number)
                ),
                fallback_url: self.search_url(selection.as_str()),
                display_label: format!("{} {}", court.display_name(), case_number),
                fallback_label: selection.to_string(),
                requires_verification: true,
            },
            Classification::NoMatch { raw_text } => {
                ResolvedTarget::unverified(self.search_url(raw_text), raw_text.clone())
            }
        }
    }
}

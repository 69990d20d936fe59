//! Validated user selections and normalized article tokens.

use std::fmt;

use crate::CoreError;

/// Highlighted text with surrounding whitespace removed. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection(String);

impl Selection {
    /// Trim `raw` and reject it when nothing is left.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const ARTICLE_MARKER: char = '제';

/// Statute article citation in the form the destination site expects,
/// e.g. `제750조` or `제839조의2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleToken(String);

impl ArticleToken {
    /// Normalise a raw regex capture: drop all whitespace and prepend the
    /// `제` marker when the capture lacks it (`"750조"` → `"제750조"`).
    pub fn normalize(raw: &str) -> Self {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.starts_with(ARTICLE_MARKER) {
            Self(compact)
        } else {
            Self(format!("{ARTICLE_MARKER}{compact}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_trimmed() {
        let sel = Selection::parse("  민법 제750조\n").unwrap();
        assert_eq!(sel.as_str(), "민법 제750조");
    }

    #[test]
    fn blank_selection_rejected() {
        assert!(matches!(Selection::parse(""), Err(CoreError::EmptySelection)));
        assert!(matches!(
            Selection::parse(" \t\n "),
            Err(CoreError::EmptySelection)
        ));
    }

    #[test]
    fn token_whitespace_stripped() {
        assert_eq!(ArticleToken::normalize("제 750조").as_str(), "제750조");
    }

    #[test]
    fn token_marker_prepended() {
        assert_eq!(ArticleToken::normalize("750조").as_str(), "제750조");
        assert_eq!(ArticleToken::normalize("839조의2").as_str(), "제839조의2");
    }

    #[test]
    fn token_already_normal() {
        assert_eq!(ArticleToken::normalize("제3조의2").as_str(), "제3조의2");
    }
}

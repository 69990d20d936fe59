//! Selection classification: statute article, court precedent, or neither.
//!
//! Classification is an ordered list of [`Rule`]s. The first rule that
//! produces a match decides the result; if none does, the selection is a
//! [`Classification::NoMatch`] and resolves to a full-text search.

use crate::catalog::{Court, LawEntry, PatternCatalog};
use crate::selection::{ArticleToken, Selection};

/// Outcome of classifying a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A known statute name plus an article citation.
    Article {
        law: &'static LawEntry,
        article: ArticleToken,
    },
    /// A case number in a recognised court's numbering convention.
    Precedent { court: Court, case_number: String },
    /// Nothing structured; `raw_text` is searched verbatim.
    NoMatch { raw_text: String },
}

/// One step of the classification priority list.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&Selection, &PatternCatalog) -> Option<Classification>,
}

pub const ARTICLE_RULE: Rule = Rule {
    name: "article",
    apply: match_article,
};

pub const PRECEDENT_RULE: Rule = Rule {
    name: "precedent",
    apply: match_precedent,
};

/// Rules for the general-purpose lookup, in priority order.
pub const INTELLIGENT_RULES: &[Rule] = &[ARTICLE_RULE, PRECEDENT_RULE];

/// Rules for the precedent-only lookup.
pub const PRECEDENT_RULES: &[Rule] = &[PRECEDENT_RULE];

/// Classify with the full priority list (article, then precedent).
pub fn classify(selection: &Selection, catalog: &PatternCatalog) -> Classification {
    classify_with(INTELLIGENT_RULES, selection, catalog)
}

/// Classify as a precedent or nothing; statute names are ignored.
pub fn classify_precedent(selection: &Selection, catalog: &PatternCatalog) -> Classification {
    classify_with(PRECEDENT_RULES, selection, catalog)
}

/// Evaluate `rules` in order and return the first match.
pub fn classify_with(
    rules: &[Rule],
    selection: &Selection,
    catalog: &PatternCatalog,
) -> Classification {
    for rule in rules {
        if let Some(found) = (rule.apply)(selection, catalog) {
            tracing::debug!(rule = rule.name, selection = %selection, "selection classified");
            return found;
        }
    }
    Classification::NoMatch {
        raw_text: selection.as_str().to_string(),
    }
}

/// Classify against one statute chosen by the user.
///
/// Without an article citation the result is a search for
/// `"<law name> <selection>"`.
pub fn classify_for_law(
    law: &'static LawEntry,
    selection: &Selection,
    catalog: &PatternCatalog,
) -> Classification {
    match extract_article(selection.as_str(), catalog) {
        Some(article) => Classification::Article { law, article },
        None => Classification::NoMatch {
            raw_text: format!("{} {}", law.display_name, selection),
        },
    }
}

fn extract_article(text: &str, catalog: &PatternCatalog) -> Option<ArticleToken> {
    catalog
        .article_regex()
        .find(text)
        .map(|m| ArticleToken::normalize(m.as_str()))
}

fn match_article(selection: &Selection, catalog: &PatternCatalog) -> Option<Classification> {
    let text = selection.as_str();
    // Containment is plain substring search; the first law in catalog
    // order that also yields an article token wins.
    catalog
        .laws()
        .iter()
        .filter(|law| text.contains(law.display_name))
        .find_map(|law| {
            extract_article(text, catalog).map(|article| Classification::Article { law, article })
        })
}

fn match_precedent(selection: &Selection, catalog: &PatternCatalog) -> Option<Classification> {
    let text = selection.as_str();
    catalog.court_patterns().iter().find_map(|pattern| {
        pattern
            .regex
            .find(text)
            .map(|m| Classification::Precedent {
                court: pattern.court,
                case_number: m.as_str().to_string(),
            })
    })
}

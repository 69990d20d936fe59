//! Static registry of supported statutes and court case-number conventions.
//!
//! Iteration order matters in both tables: the classifier walks laws in
//! catalog order (first textual hit wins) and tries court patterns in list
//! order (first regex hit wins).

use regex::Regex;

use crate::CoreError;

/// Statute grouping used by the settings screen and the menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    PublicLaw,
    CivilLaw,
    CriminalLaw,
    IntellectualProperty,
}

/// Categories in display order.
pub const CATEGORY_ORDER: [Category; 4] = [
    Category::PublicLaw,
    Category::CivilLaw,
    Category::CriminalLaw,
    Category::IntellectualProperty,
];

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PublicLaw => "공법",
            Self::CivilLaw => "민사법",
            Self::CriminalLaw => "형사법",
            Self::IntellectualProperty => "지적재산권법",
        }
    }
}

/// A statute the destination site addresses as `/법령/<url_slug>/<article>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LawEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub url_slug: &'static str,
    pub category: Category,
}

const fn law(
    id: &'static str,
    display_name: &'static str,
    url_slug: &'static str,
    category: Category,
) -> LawEntry {
    LawEntry {
        id,
        display_name,
        url_slug,
        category,
    }
}

/// All supported statutes, in classifier order.
pub static LAWS: &[LawEntry] = &[
    // 공법
    law("constitution", "헌법", "대한민국헌법", Category::PublicLaw),
    law("adminLitigation", "행정소송법", "행정소송법", Category::PublicLaw),
    // 민사법
    law("civilLaw", "민법", "민법", Category::CivilLaw),
    law("commercialLaw", "상법", "상법", Category::CivilLaw),
    law("civilProcedure", "민사소송법", "민사소송법", Category::CivilLaw),
    // 형사법
    law("criminalLaw", "형법", "형법", Category::CriminalLaw),
    law("criminalProcedure", "형사소송법", "형사소송법", Category::CriminalLaw),
    // 지적재산권법
    law("patentAct", "특허법", "특허법", Category::IntellectualProperty),
    law("utilityModelAct", "실용신안법", "실용신안법", Category::IntellectualProperty),
    law("designProtectionAct", "디자인보호법", "디자인보호법", Category::IntellectualProperty),
    law("trademarkAct", "상표법", "상표법", Category::IntellectualProperty),
    law("copyrightAct", "저작권법", "저작권법", Category::IntellectualProperty),
];

/// Look up a statute by its catalog id.
pub fn find_law(id: &str) -> Option<&'static LawEntry> {
    LAWS.iter().find(|l| l.id == id)
}

/// Courts whose case numbers the destination site can address directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Court {
    Constitutional,
    Supreme,
    Patent,
}

impl Court {
    /// Path segment on the destination site.
    pub fn url_name(&self) -> &'static str {
        match self {
            Self::Constitutional => "헌법재판소",
            Self::Supreme => "대법원",
            Self::Patent => "특허법원",
        }
    }

    pub fn display_name(&self) -> &'static str {
        // The site uses the court's own name in both places.
        self.url_name()
    }
}

/// Case-number regex sources, in priority order.
///
/// The constitutional pattern goes first: its `헌` + syllable-range shape
/// overlaps the syllable classes of the other courts.
pub const COURT_PATTERN_SOURCES: [(Court, &str); 3] = [
    (Court::Constitutional, r"\d{2,4}헌[가-아]\d+"),
    (Court::Supreme, r"\d{2,4}(다|도|두)\d+"),
    (Court::Patent, r"\d{2,4}(허|후|흐|히|카허)\d+"),
];

/// Article citation: optional `제`, digits, `조`, optional `의` + digits.
pub const ARTICLE_PATTERN_SOURCE: &str = r"제?\s*\d+조(의\d+)?";

/// A compiled court case-number convention.
#[derive(Debug, Clone)]
pub struct CourtPattern {
    pub court: Court,
    pub regex: Regex,
}

/// Compiled catalog handed to the classifier.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    laws: &'static [LawEntry],
    courts: Vec<CourtPattern>,
    article: Regex,
}

impl PatternCatalog {
    /// Compile the built-in statute list and court conventions.
    pub fn standard() -> Result<Self, CoreError> {
        let courts = COURT_PATTERN_SOURCES
            .iter()
            .map(|(court, src)| {
                Ok(CourtPattern {
                    court: *court,
                    regex: Regex::new(src)?,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Ok(Self {
            laws: LAWS,
            courts,
            article: Regex::new(ARTICLE_PATTERN_SOURCE)?,
        })
    }

    pub fn laws(&self) -> &'static [LawEntry] {
        self.laws
    }

    /// Court patterns in the order they are tried.
    pub fn court_patterns(&self) -> &[CourtPattern] {
        &self.courts
    }

    pub fn article_regex(&self) -> &Regex {
        &self.article
    }
}

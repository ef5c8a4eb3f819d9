//! Filter types and structured search filters for Europe PMC queries

use chrono::NaiveDate;

use crate::error::{EuropePmcError, Result};

/// Source databases indexed by Europe PMC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceDb {
    /// PubMed/MEDLINE
    Med,
    /// PubMed Central
    Pmc,
    /// Patents
    Pat,
    /// EThOS theses
    Eth,
    /// NHS clinical guidelines
    Hir,
    /// CiteXplore
    Ctx,
    /// Preprints
    Ppr,
}

impl SourceDb {
    /// Upstream source code as used in `SRC:` clauses and result payloads
    pub fn code(&self) -> &'static str {
        match self {
            SourceDb::Med => "MED",
            SourceDb::Pmc => "PMC",
            SourceDb::Pat => "PAT",
            SourceDb::Eth => "ETH",
            SourceDb::Hir => "HIR",
            SourceDb::Ctx => "CTX",
            SourceDb::Ppr => "PPR",
        }
    }
}

/// Publication type categories with their upstream `PUB_TYPE` coded values
///
/// Each category maps to its own codes only: excluding corrections must not
/// accidentally exclude errata or retractions, which Europe PMC codes
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicationTypeCategory {
    Correction,
    Erratum,
    Retraction,
    Editorial,
    Letter,
    Comment,
    Review,
    ResearchArticle,
}

impl PublicationTypeCategory {
    /// Upstream coded values for this category
    pub fn codes(&self) -> &'static [&'static str] {
        match self {
            PublicationTypeCategory::Correction => &["correction", "corrigendum"],
            PublicationTypeCategory::Erratum => &["published erratum", "erratum"],
            PublicationTypeCategory::Retraction => &["retraction of publication", "retraction"],
            PublicationTypeCategory::Editorial => &["editorial"],
            PublicationTypeCategory::Letter => &["letter"],
            PublicationTypeCategory::Comment => &["comment"],
            PublicationTypeCategory::Review => &["review"],
            PublicationTypeCategory::ResearchArticle => &["research-article", "journal article"],
        }
    }
}

/// Full-text section categories with their upstream section codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionCategory {
    Introduction,
    Methods,
    Results,
    Discussion,
    Conclusion,
    CaseStudy,
    Supplementary,
}

impl SectionCategory {
    /// Upstream section code as used in `SECTION:` clauses
    pub fn code(&self) -> &'static str {
        match self {
            SectionCategory::Introduction => "INTRO",
            SectionCategory::Methods => "METHODS",
            SectionCategory::Results => "RESULTS",
            SectionCategory::Discussion => "DISCUSS",
            SectionCategory::Conclusion => "CONCL",
            SectionCategory::CaseStudy => "CASE",
            SectionCategory::Supplementary => "SUPPL",
        }
    }
}

/// Structured search filters, lowered to one query clause per populated
/// dimension
///
/// # Example
///
/// ```
/// use europepmc_client::{PublicationTypeCategory, SearchFilters, SourceDb};
/// use chrono::NaiveDate;
///
/// let filters = SearchFilters {
///     date_from: NaiveDate::from_ymd_opt(2020, 1, 1),
///     sources: vec![SourceDb::Med, SourceDb::Pmc],
///     exclude_types: vec![
///         PublicationTypeCategory::Correction,
///         PublicationTypeCategory::Retraction,
///     ],
///     open_access_only: true,
///     ..Default::default()
/// };
/// assert!(filters.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Earliest first-publication date (inclusive)
    pub date_from: Option<NaiveDate>,
    /// Latest first-publication date (inclusive)
    pub date_to: Option<NaiveDate>,
    /// Journal title filter
    pub journal: Option<String>,
    /// Restrict to these source databases; empty means no restriction
    pub sources: Vec<SourceDb>,
    /// Only open access publications
    pub open_access_only: bool,
    /// Only publications with full text available
    pub has_full_text: bool,
    /// Publication type categories to require
    pub include_types: Vec<PublicationTypeCategory>,
    /// Publication type categories to exclude
    pub exclude_types: Vec<PublicationTypeCategory>,
    /// Full-text sections to require
    pub include_sections: Vec<SectionCategory>,
    /// Full-text sections to exclude
    pub exclude_sections: Vec<SectionCategory>,
}

impl SearchFilters {
    /// Validate filter consistency before any query construction.
    ///
    /// Rejects a date range with `from > to` and include/exclude sets that
    /// overlap on the same dimension. Overlaps are caller errors, never
    /// silently resolved in favor of one side.
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(EuropePmcError::InvalidDateRange { from, to });
            }
        }

        for category in &self.include_types {
            if self.exclude_types.contains(category) {
                return Err(EuropePmcError::InvalidFilter(format!(
                    "publication type {category:?} is both included and excluded"
                )));
            }
        }

        for section in &self.include_sections {
            if self.exclude_sections.contains(section) {
                return Err(EuropePmcError::InvalidFilter(format!(
                    "section {section:?} is both included and excluded"
                )));
            }
        }

        Ok(())
    }

    /// Whether no dimension is populated
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.journal.is_none()
            && self.sources.is_empty()
            && !self.open_access_only
            && !self.has_full_text
            && self.include_types.is_empty()
            && self.exclude_types.is_empty()
            && self.include_sections.is_empty()
            && self.exclude_sections.is_empty()
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{EuropePmcError, Result};

/// A publication record normalized from either upstream payload shape
///
/// Fields the upstream omitted are present with explicit empty values, so a
/// partially described publication never fails a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Upstream identifier within its source database
    pub id: String,
    /// Source database code (MED, PMC, PPR, ...)
    pub source: String,
    /// PubMed ID, if assigned
    pub pmid: Option<String>,
    /// PubMed Central ID, if assigned
    pub pmcid: Option<String>,
    /// DOI, if assigned
    pub doi: Option<String>,
    /// Publication title
    pub title: String,
    /// Delimited author list exactly as returned upstream
    pub author_string: String,
    /// Journal title
    pub journal: String,
    /// First publication date (YYYY-MM-DD, or year only when that is all
    /// the upstream knows)
    pub publication_date: String,
    /// Times cited, when reported
    pub citation_count: Option<u32>,
    /// Whether the publication is open access
    pub is_open_access: bool,
    /// Whether full text is available
    pub has_full_text: bool,
}

/// A disambiguated match: a record, its similarity score, and the author
/// entry that matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub record: PublicationRecord,
    /// Similarity score in [0, 100]
    pub score: u8,
    /// The author-string entry the score was computed against
    pub matched_author: String,
}

/// Result detail level requested from the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultType {
    /// Identifiers only
    IdList,
    /// Key metadata
    #[default]
    Lite,
    /// Full metadata
    Core,
}

impl ResultType {
    pub(crate) fn as_api_param(&self) -> &'static str {
        match self {
            ResultType::IdList => "idlist",
            ResultType::Lite => "lite",
            ResultType::Core => "core",
        }
    }
}

/// Sort order for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Relevance,
    /// Most recent first
    Date,
    /// Most cited first
    Cited,
}

impl SortOrder {
    pub(crate) fn as_api_param(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Date => "date",
            SortOrder::Cited => "cited",
        }
    }
}

/// Maximum page size accepted by the search endpoint
pub const MAX_PAGE_SIZE: usize = 1000;

/// Pagination parameters for search requests
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Results per page, in [1, 1000]
    pub page_size: usize,
    /// Cursor for fetching the next page, from a previous response
    pub cursor_mark: Option<String>,
    /// Detail level for returned records
    pub result_type: ResultType,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            cursor_mark: None,
            result_type: ResultType::default(),
        }
    }

    /// Validate the page size against the upstream bound
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(EuropePmcError::InvalidPageSize {
                size: self.page_size,
            });
        }
        Ok(())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(25)
    }
}

//! Query construction for the Europe PMC search grammar

mod dates;
mod filters;

pub use filters::{PublicationTypeCategory, SearchFilters, SectionCategory, SourceDb};

use crate::error::{EuropePmcError, Result};

/// A finished query string in the Europe PMC grammar
///
/// Immutable once built; construct via [`SearchQuery::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// The query string to send as the `query` request parameter
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builder for Europe PMC search queries
///
/// Free-text keywords pass through untouched; each filter dimension lowers to
/// exactly one clause, and all clauses are joined with `AND`.
///
/// # Example
///
/// ```
/// use europepmc_client::SearchQuery;
///
/// let query = SearchQuery::new()
///     .query("stem cells AND regeneration")
///     .journal("Nature")
///     .open_access_only()
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     query.as_str(),
///     r#"stem cells AND regeneration AND JOURNAL:"Nature" AND OPEN_ACCESS:Y"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub(crate) terms: Vec<String>,
    pub(crate) clauses: Vec<String>,
}

/// Quote a phrase value so grammar metacharacters (quotes, brackets, colons)
/// are treated as literal content
pub(crate) fn quote_phrase(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

impl SearchQuery {
    /// Create an empty query builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add free-text search terms (passed through to the grammar unchanged)
    pub fn query<S: Into<String>>(mut self, terms: S) -> Self {
        let terms = terms.into();
        if !terms.trim().is_empty() {
            self.terms.push(terms);
        }
        self
    }

    /// Filter by author name (`AUTH:"…"`)
    pub fn author<S: AsRef<str>>(mut self, name: S) -> Self {
        self.clauses
            .push(format!("AUTH:{}", quote_phrase(name.as_ref())));
        self
    }

    /// Filter by journal title (`JOURNAL:"…"`)
    pub fn journal<S: AsRef<str>>(mut self, journal: S) -> Self {
        self.clauses
            .push(format!("JOURNAL:{}", quote_phrase(journal.as_ref())));
        self
    }

    /// Filter by external identifier within a source (`EXT_ID:"…" AND SRC:…`)
    pub fn external_id<S: AsRef<str>>(mut self, id: S, source: SourceDb) -> Self {
        self.clauses
            .push(format!("EXT_ID:{}", quote_phrase(id.as_ref())));
        self.clauses.push(format!("SRC:{}", source.code()));
        self
    }

    /// Restrict to the given source databases, combined with OR in one clause.
    /// An empty slice means no restriction, not "match nothing".
    pub fn sources(mut self, sources: &[SourceDb]) -> Self {
        match sources {
            [] => {}
            [single] => self.clauses.push(format!("SRC:{}", single.code())),
            many => {
                let alternatives: Vec<String> =
                    many.iter().map(|s| format!("SRC:{}", s.code())).collect();
                self.clauses.push(format!("({})", alternatives.join(" OR ")));
            }
        }
        self
    }

    /// Restrict to open access publications (`OPEN_ACCESS:Y`)
    pub fn open_access_only(mut self) -> Self {
        self.clauses.push("OPEN_ACCESS:Y".to_string());
        self
    }

    /// Restrict to publications with full text available (`HAS_FT:Y`)
    pub fn has_full_text(mut self) -> Self {
        self.clauses.push("HAS_FT:Y".to_string());
        self
    }

    /// Require one of the given publication type categories, as a single
    /// OR clause over the categories' coded values
    pub fn include_types(mut self, categories: &[PublicationTypeCategory]) -> Self {
        if let Some(clause) = type_alternatives(categories) {
            self.clauses.push(clause);
        }
        self
    }

    /// Exclude the given publication type categories, as a single NOT clause
    /// covering exactly those categories' coded values
    pub fn exclude_types(mut self, categories: &[PublicationTypeCategory]) -> Self {
        if let Some(clause) = type_alternatives(categories) {
            self.clauses.push(format!("NOT {clause}"));
        }
        self
    }

    /// Require one of the given full-text sections
    pub fn include_sections(mut self, sections: &[SectionCategory]) -> Self {
        if let Some(clause) = section_alternatives(sections) {
            self.clauses.push(clause);
        }
        self
    }

    /// Exclude the given full-text sections
    pub fn exclude_sections(mut self, sections: &[SectionCategory]) -> Self {
        if let Some(clause) = section_alternatives(sections) {
            self.clauses.push(format!("NOT {clause}"));
        }
        self
    }

    /// Lower structured filters onto keywords, validating the filters first
    ///
    /// # Errors
    ///
    /// Propagates [`SearchFilters::validate`] errors; never constructs a
    /// query from invalid filters.
    pub fn from_filters(keywords: &str, filters: &SearchFilters) -> Result<Self> {
        filters.validate()?;

        let mut query = SearchQuery::new().query(keywords);

        query = query.published_between(filters.date_from, filters.date_to);
        if let Some(journal) = &filters.journal {
            query = query.journal(journal);
        }
        query = query.sources(&filters.sources);
        if filters.open_access_only {
            query = query.open_access_only();
        }
        if filters.has_full_text {
            query = query.has_full_text();
        }
        query = query
            .include_types(&filters.include_types)
            .exclude_types(&filters.exclude_types)
            .include_sections(&filters.include_sections)
            .exclude_sections(&filters.exclude_sections);

        Ok(query)
    }

    /// Number of filter clauses accumulated so far
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Build the final immutable query string
    ///
    /// # Errors
    ///
    /// [`EuropePmcError::EmptyQuery`] when there are no keywords and no
    /// filter clauses.
    pub fn build(&self) -> Result<Query> {
        if self.terms.is_empty() && self.clauses.is_empty() {
            return Err(EuropePmcError::EmptyQuery);
        }

        let mut parts = Vec::with_capacity(1 + self.clauses.len());
        if !self.terms.is_empty() {
            parts.push(self.terms.join(" "));
        }
        parts.extend(self.clauses.iter().cloned());

        Ok(Query(parts.join(" AND ")))
    }
}

fn type_alternatives(categories: &[PublicationTypeCategory]) -> Option<String> {
    if categories.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = categories
        .iter()
        .flat_map(|c| c.codes())
        .map(|code| format!("PUB_TYPE:{}", quote_phrase(code)))
        .collect();
    Some(match alternatives.as_slice() {
        [single] => single.clone(),
        _ => format!("({})", alternatives.join(" OR ")),
    })
}

fn section_alternatives(sections: &[SectionCategory]) -> Option<String> {
    if sections.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = sections
        .iter()
        .map(|s| format!("SECTION:{}", quote_phrase(s.code())))
        .collect();
    Some(match alternatives.as_slice() {
        [single] => single.clone(),
        _ => format!("({})", alternatives.join(" OR ")),
    })
}

//! Date filtering on the canonical first-publication date field
//!
//! Europe PMC supports exact range queries only on `FIRST_PDATE`; lowering
//! date filters onto that field (rather than the generic date field) keeps
//! range semantics exact and avoids drift from secondary date fields.

use chrono::NaiveDate;

use super::SearchQuery;

impl SearchQuery {
    /// Filter by an inclusive first-publication date range.
    ///
    /// Open ends are expressed with `*`; passing `(None, None)` adds no
    /// clause. Range ordering is checked by
    /// [`SearchFilters::validate`](super::SearchFilters::validate) before
    /// lowering.
    ///
    /// # Example
    ///
    /// ```
    /// use europepmc_client::SearchQuery;
    /// use chrono::NaiveDate;
    ///
    /// let query = SearchQuery::new()
    ///     .query("CRISPR")
    ///     .published_between(
    ///         NaiveDate::from_ymd_opt(2020, 1, 1),
    ///         NaiveDate::from_ymd_opt(2024, 12, 31),
    ///     )
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     query.as_str(),
    ///     "CRISPR AND FIRST_PDATE:[2020-01-01 TO 2024-12-31]"
    /// );
    /// ```
    pub fn published_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        if from.is_none() && to.is_none() {
            return self;
        }

        let lower = from.map_or_else(|| "*".to_string(), |d| d.format("%Y-%m-%d").to_string());
        let upper = to.map_or_else(|| "*".to_string(), |d| d.format("%Y-%m-%d").to_string());
        self.clauses
            .push(format!("FIRST_PDATE:[{lower} TO {upper}]"));
        self
    }

    /// Filter to publications first published on or after `date`
    pub fn published_after(self, date: NaiveDate) -> Self {
        self.published_between(Some(date), None)
    }

    /// Filter to publications first published on or before `date`
    pub fn published_before(self, date: NaiveDate) -> Self {
        self.published_between(None, Some(date))
    }
}

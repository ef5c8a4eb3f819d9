//! Async client for the Europe PMC REST API

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::disambig::AuthorMatcher;
use crate::error::{EuropePmcError, Result};
use crate::europepmc::models::{
    MatchResult, Pagination, PublicationRecord, ResultType, SortOrder, MAX_PAGE_SIZE,
};
use crate::europepmc::parser::{normalize, Records, ResponseBody};
use crate::europepmc::query::{Query, SearchFilters, SearchQuery, SourceDb};
use crate::rate_limit::RateLimiter;
use crate::retry::with_retry;

/// Client for searching and fetching Europe PMC publications
///
/// Cheap to clone; clones share the same rate limiter, so every request
/// issued through any clone draws from one token budget.
///
/// # Example
///
/// ```no_run
/// use europepmc_client::{EuropePmcClient, Pagination, SearchFilters, SortOrder};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = EuropePmcClient::new();
/// let records = client
///     .search(
///         "CRISPR base editing",
///         &SearchFilters::default(),
///         &Pagination::default(),
///         Some(SortOrder::Date),
///     )
///     .await?;
/// for record in records {
///     println!("{}: {}", record.id, record.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EuropePmcClient {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
    cancel: CancellationToken,
}

impl EuropePmcClient {
    /// Create a client with default configuration
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client from a configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: config.effective_base_url().to_string(),
            rate_limiter: config.create_rate_limiter(),
            cancel: CancellationToken::new(),
            config,
            client,
        }
    }

    /// Token that cancels all in-flight and queued requests of this client
    /// (and its clones) when triggered
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Search publications with structured filters
    ///
    /// Builds the query from `keywords` and `filters`, issues one page of
    /// results per `pagination`, and normalizes the response. Records the
    /// upstream only partially described come back with explicit empty
    /// fields rather than failing the batch.
    #[instrument(skip(self, filters, pagination))]
    pub async fn search(
        &self,
        keywords: &str,
        filters: &SearchFilters,
        pagination: &Pagination,
        sort: Option<SortOrder>,
    ) -> Result<Vec<PublicationRecord>> {
        let query = SearchQuery::from_filters(keywords, filters)?.build()?;
        let records = self.search_query(&query, pagination, sort).await?;
        Ok(records.collect())
    }

    /// Search with a prebuilt query, returning the lazy record sequence
    /// (exposes hit count and the next cursor mark for pagination)
    pub async fn search_query(
        &self,
        query: &Query,
        pagination: &Pagination,
        sort: Option<SortOrder>,
    ) -> Result<Records> {
        pagination.validate()?;

        let mut url = format!(
            "{}/search?query={}&format=json&pageSize={}&resultType={}",
            self.base_url,
            urlencoding::encode(query.as_str()),
            pagination.page_size,
            pagination.result_type.as_api_param(),
        );
        if let Some(sort) = sort {
            url.push_str("&sort=");
            url.push_str(sort.as_api_param());
        }
        if let Some(cursor) = &pagination.cursor_mark {
            url.push_str("&cursorMark=");
            url.push_str(&urlencoding::encode(cursor));
        }

        debug!(query = %query, page_size = pagination.page_size, "Searching Europe PMC");
        let body = self.get_with_retry(&url, "search").await?;
        let records = normalize(body)?;
        info!(
            hit_count = records.hit_count(),
            "Search page retrieved"
        );
        Ok(records)
    }

    /// Search publications by author name and rank results by how well each
    /// record's author string matches `name`
    ///
    /// Fetches twice the requested page size (capped at the API maximum) so
    /// threshold filtering still tends to fill the page, then truncates the
    /// ranked matches back to `pagination.page_size`. `threshold` falls back
    /// to the configured default when `None`.
    #[instrument(skip(self, pagination))]
    pub async fn search_by_author(
        &self,
        name: &str,
        additional_terms: Option<&str>,
        threshold: Option<u8>,
        pagination: &Pagination,
    ) -> Result<Vec<MatchResult>> {
        pagination.validate()?;
        let threshold = threshold.unwrap_or(self.config.default_threshold);
        // Caller mistake, not worth a round trip or a rate token
        if !(50..=100).contains(&threshold) {
            return Err(EuropePmcError::InvalidThreshold { threshold });
        }

        let mut builder = SearchQuery::new().author(name);
        if let Some(terms) = additional_terms {
            builder = builder.query(terms);
        }
        let query = builder.build()?;

        // Over-fetch so post-filtering can still fill the requested page
        let fetch = Pagination {
            page_size: (pagination.page_size * 2).min(MAX_PAGE_SIZE),
            cursor_mark: pagination.cursor_mark.clone(),
            result_type: pagination.result_type,
        };
        let candidates: Vec<PublicationRecord> = self
            .search_query(&query, &fetch, Some(SortOrder::Relevance))
            .await?
            .collect();

        let mut matches = AuthorMatcher::new().rank(name, candidates, threshold)?;
        matches.truncate(pagination.page_size);
        Ok(matches)
    }

    /// Fetch a single publication's full metadata by source and identifier
    ///
    /// Returns `Ok(None)` when the identifier is unknown upstream.
    #[instrument(skip(self))]
    pub async fn get_publication_details(
        &self,
        source: SourceDb,
        id: &str,
    ) -> Result<Option<PublicationRecord>> {
        let query = SearchQuery::new().external_id(id, source).build()?;
        let pagination = Pagination {
            page_size: 1,
            cursor_mark: None,
            result_type: ResultType::Core,
        };
        let mut records = self.search_query(&query, &pagination, None).await?;
        Ok(records.next())
    }

    /// Fetch the full text XML of an open access PMC article
    ///
    /// `pmcid` includes the `PMC` prefix, e.g. `PMC7096066`.
    #[instrument(skip(self))]
    pub async fn fetch_full_text_xml(&self, pmcid: &str) -> Result<String> {
        let url = format!("{}/PMC/{}/fullTextXML", self.base_url, pmcid);
        match self.get_with_retry(&url, "fetch_full_text_xml").await? {
            ResponseBody::Xml(text) | ResponseBody::Json(text) => Ok(text),
        }
    }

    /// Issue a GET with rate limiting and retry
    ///
    /// The token is acquired inside the retry closure, so each attempt
    /// (including retries) draws from the rate budget.
    async fn get_with_retry(&self, url: &str, operation_name: &str) -> Result<ResponseBody> {
        with_retry(
            || async {
                self.rate_limiter.acquire().await;
                let response = self.client.get(url).send().await?;
                Self::classify_response(response).await
            },
            &self.config.retry_config,
            &self.cancel,
            operation_name,
        )
        .await
    }

    /// Map an HTTP response to a body or an error with retry semantics:
    /// 429 and 5xx are transient, other non-success statuses are rejections.
    async fn classify_response(response: reqwest::Response) -> Result<ResponseBody> {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Transient upstream status");
            return Err(EuropePmcError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EuropePmcError::RequestRejected {
                status: status.as_u16(),
                message,
            });
        }

        let is_xml = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("xml"));
        let text = response.text().await?;
        Ok(if is_xml {
            ResponseBody::Xml(text)
        } else {
            ResponseBody::Json(text)
        })
    }
}

impl Default for EuropePmcClient {
    fn default() -> Self {
        Self::new()
    }
}

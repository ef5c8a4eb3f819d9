//! A Rust client for the Europe PMC REST API
//!
//! Search the Europe PMC bibliographic database, normalize its JSON and XML
//! payloads into one record type, and disambiguate authors with fuzzy name
//! matching. Requests are rate limited to the service's documented fair-use
//! budget and transient failures are retried with exponential backoff.
//!
//! ## Quick Start
//!
//! ```no_run
//! use europepmc_client::{EuropePmcClient, Pagination, SearchFilters, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EuropePmcClient::new();
//!
//!     let records = client
//!         .search(
//!             "epidermal stem cells",
//!             &SearchFilters::default(),
//!             &Pagination::new(10),
//!             Some(SortOrder::Cited),
//!         )
//!         .await?;
//!
//!     for record in records {
//!         println!("[{}] {} ({})", record.source, record.title, record.publication_date);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Author Search
//!
//! Author strings in bibliographic records are free text, so searching by
//! author returns publications from anyone with a similar name.
//! [`EuropePmcClient::search_by_author`] scores each result's author string
//! against the target name and keeps only plausible matches:
//!
//! ```no_run
//! use europepmc_client::{EuropePmcClient, Pagination};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EuropePmcClient::new();
//! let matches = client
//!     .search_by_author("Watt FM", Some("skin"), Some(70), &Pagination::new(20))
//!     .await?;
//!
//! for m in matches {
//!     println!("{:3} {} -- {}", m.score, m.matched_author, m.record.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Structured Queries
//!
//! [`SearchQuery`] builds queries in the Europe PMC grammar directly, for
//! callers that need more than [`SearchFilters`] expresses:
//!
//! ```
//! use europepmc_client::{SearchQuery, SourceDb};
//!
//! let query = SearchQuery::new()
//!     .query("organoid")
//!     .journal("Nature")
//!     .sources(&[SourceDb::Med, SourceDb::Pmc])
//!     .open_access_only()
//!     .build()
//!     .unwrap();
//! assert!(query.as_str().contains("OPEN_ACCESS:Y"));
//! ```

pub mod config;
pub mod disambig;
pub mod error;
pub mod europepmc;
pub mod rate_limit;
pub mod retry;

pub use config::{ClientConfig, EUROPEPMC_BASE_URL, EUROPEPMC_TEST_URL};
pub use disambig::AuthorMatcher;
pub use error::{EuropePmcError, Result};
pub use europepmc::{
    EuropePmcClient, MatchResult, Pagination, PublicationRecord, PublicationTypeCategory, Query,
    Records, ResponseBody, ResultType, SearchFilters, SearchQuery, SectionCategory, SortOrder,
    SourceDb, MAX_PAGE_SIZE,
};
pub use rate_limit::RateLimiter;
pub use retry::{with_retry, RetryConfig, RetryableError};

pub use EuropePmcClient as Client;

//! Europe PMC REST API client modules

pub mod client;
pub mod models;
pub mod parser;
pub mod query;
pub mod responses;

pub use client::EuropePmcClient;
pub use models::{
    MatchResult, Pagination, PublicationRecord, ResultType, SortOrder, MAX_PAGE_SIZE,
};
pub use parser::{normalize, Records, ResponseBody};
pub use query::{
    PublicationTypeCategory, Query, SearchFilters, SearchQuery, SectionCategory, SourceDb,
};

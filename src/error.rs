use std::result;

use crate::retry::RetryableError;
use thiserror::Error;

/// Error types for Europe PMC client operations
#[derive(Error, Debug)]
pub enum EuropePmcError {
    /// Query had no keywords and no filter clauses
    #[error("query is empty: provide keywords or at least one filter")]
    EmptyQuery,

    /// Disambiguation threshold outside the accepted range
    #[error("invalid disambiguation threshold {threshold}: must be in [50, 100]")]
    InvalidThreshold { threshold: u8 },

    /// Date filter with from > to
    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange {
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    },

    /// Contradictory or otherwise invalid filter combination
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Page size outside the API-accepted range
    #[error("invalid page size {size}: must be in [1, 1000]")]
    InvalidPageSize { size: usize },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Upstream payload could not be parsed as either supported shape
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// Non-retryable upstream rejection (4xx other than 429)
    #[error("request rejected by upstream: HTTP {status}: {message}")]
    RequestRejected { status: u16, message: String },

    /// Retry budget exhausted on a transient upstream condition
    #[error("transient failure after {attempts} attempts: {message}")]
    TransientFailure {
        attempts: u32,
        last_status: Option<u16>,
        message: String,
    },

    /// Caller-initiated cancellation aborted the request
    #[error("request cancelled by caller")]
    Cancelled,

    /// Transient upstream status (429/5xx) observed on a single attempt.
    /// Converted to `TransientFailure` once the retry budget is exhausted.
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },
}

pub type Result<T> = result::Result<T, EuropePmcError>;

impl EuropePmcError {
    /// Last upstream HTTP status associated with this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            EuropePmcError::RequestError(err) => err.status().map(|s| s.as_u16()),
            EuropePmcError::ApiError { status, .. }
            | EuropePmcError::RequestRejected { status, .. } => Some(*status),
            EuropePmcError::TransientFailure { last_status, .. } => *last_status,
            _ => None,
        }
    }
}

impl RetryableError for EuropePmcError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            EuropePmcError::RequestError(err) => {
                if err.is_timeout() || err.is_connect() {
                    return true;
                }

                // Server errors (5xx) and rate limiting (429)
                if let Some(status) = err.status() {
                    return status.is_server_error() || status.as_u16() == 429;
                }

                // DNS and other network errors
                !err.is_builder() && !err.is_redirect() && !err.is_decode()
            }

            EuropePmcError::ApiError { status, .. } => {
                (*status >= 500 && *status < 600) || *status == 429
            }

            // Validation mistakes, rejections, and parse failures are caller or
            // payload problems; retrying cannot fix them.
            EuropePmcError::EmptyQuery
            | EuropePmcError::InvalidThreshold { .. }
            | EuropePmcError::InvalidDateRange { .. }
            | EuropePmcError::InvalidFilter(_)
            | EuropePmcError::InvalidPageSize { .. }
            | EuropePmcError::JsonError(_)
            | EuropePmcError::MalformedResponse { .. }
            | EuropePmcError::RequestRejected { .. }
            | EuropePmcError::TransientFailure { .. }
            | EuropePmcError::Cancelled => false,
        }
    }

    fn retry_reason(&self) -> &str {
        if self.is_retryable() {
            match self {
                EuropePmcError::RequestError(err) if err.is_timeout() => "Request timeout",
                EuropePmcError::RequestError(err) if err.is_connect() => "Connection error",
                EuropePmcError::RequestError(_) => "Network error",
                EuropePmcError::ApiError { status, .. } => match status {
                    429 => "Rate limit exceeded",
                    500..=599 => "Server error",
                    _ => "Temporary API error",
                },
                _ => "Transient error",
            }
        } else {
            match self {
                EuropePmcError::JsonError(_) | EuropePmcError::MalformedResponse { .. } => {
                    "Invalid response payload"
                }
                EuropePmcError::RequestRejected { .. } => "Rejected by upstream",
                EuropePmcError::Cancelled => "Cancelled by caller",
                EuropePmcError::EmptyQuery
                | EuropePmcError::InvalidThreshold { .. }
                | EuropePmcError::InvalidDateRange { .. }
                | EuropePmcError::InvalidFilter(_)
                | EuropePmcError::InvalidPageSize { .. } => "Invalid input",
                _ => "Non-transient error",
            }
        }
    }
}

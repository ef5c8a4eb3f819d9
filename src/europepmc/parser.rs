//! Response normalization: heterogeneous upstream payloads into
//! [`PublicationRecord`]s
//!
//! The payload shape is resolved once at the transport boundary (from the
//! Content-Type header) into a [`ResponseBody`] variant; one normalization
//! function per variant replaces ad hoc field probing downstream.

use tracing::{debug, instrument};

use crate::error::{EuropePmcError, Result};
use crate::europepmc::models::PublicationRecord;
use crate::europepmc::responses::{RawResponse, RawResult};

/// An upstream response body tagged with its shape
#[derive(Debug, Clone)]
pub enum ResponseBody {
    Json(String),
    Xml(String),
}

/// A lazy, finite, one-pass sequence of normalized records
///
/// Parsing happens up front (an unparseable payload fails the whole call with
/// [`EuropePmcError::MalformedResponse`]); per-record normalization happens
/// as the iterator is consumed. Not restartable.
#[derive(Debug)]
pub struct Records {
    hit_count: Option<u32>,
    next_cursor_mark: Option<String>,
    inner: std::vec::IntoIter<RawResult>,
}

impl Records {
    /// Total hits reported upstream for the whole query, if present
    pub fn hit_count(&self) -> Option<u32> {
        self.hit_count
    }

    /// Cursor for requesting the next page, if the upstream supplied one
    pub fn next_cursor_mark(&self) -> Option<&str> {
        self.next_cursor_mark.as_deref()
    }
}

impl Iterator for Records {
    type Item = PublicationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(normalize_result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Normalize an upstream response into a record sequence
///
/// Missing fields within a record become explicit empty values; only a
/// payload that cannot be parsed as its declared shape fails.
#[instrument(skip(body), fields(shape = body.shape_name()))]
pub fn normalize(body: ResponseBody) -> Result<Records> {
    let raw: RawResponse = match &body {
        ResponseBody::Json(text) => {
            serde_json::from_str(text).map_err(|e| EuropePmcError::MalformedResponse {
                message: format!("not a recognized JSON response: {e}"),
            })?
        }
        ResponseBody::Xml(text) => {
            quick_xml::de::from_str(text).map_err(|e| EuropePmcError::MalformedResponse {
                message: format!("not a recognized XML response: {e}"),
            })?
        }
    };

    let results = raw.result_list.unwrap_or_default().result;
    debug!(records = results.len(), "Normalized upstream response");

    Ok(Records {
        hit_count: raw.hit_count,
        next_cursor_mark: raw.next_cursor_mark,
        inner: results.into_iter(),
    })
}

impl ResponseBody {
    fn shape_name(&self) -> &'static str {
        match self {
            ResponseBody::Json(_) => "json",
            ResponseBody::Xml(_) => "xml",
        }
    }
}

fn normalize_result(raw: RawResult) -> PublicationRecord {
    // firstPublicationDate is canonical; pubYear is the coarse fallback
    let publication_date = raw
        .first_publication_date
        .or(raw.pub_year)
        .unwrap_or_default();

    PublicationRecord {
        id: raw.id.unwrap_or_default(),
        source: raw.source.unwrap_or_default(),
        pmid: raw.pmid,
        pmcid: raw.pmcid,
        doi: raw.doi,
        title: raw.title.unwrap_or_default(),
        author_string: raw.author_string.unwrap_or_default(),
        journal: raw.journal_title.unwrap_or_default(),
        publication_date,
        citation_count: raw.cited_by_count,
        is_open_access: raw.is_open_access,
        has_full_text: raw.has_full_text,
    }
}

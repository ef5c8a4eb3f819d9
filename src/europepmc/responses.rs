//! Raw upstream payload types shared by the JSON and XML shapes
//!
//! Field names mirror the upstream payload exactly (`authorString`,
//! `firstPublicationDate`, ...); the same structs deserialize from both
//! `serde_json` and `quick_xml`, which is what guarantees the two shapes
//! normalize identically.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub(crate) struct RawResponse {
    #[serde(rename = "hitCount", default, deserialize_with = "lenient_u32")]
    pub hit_count: Option<u32>,
    #[serde(rename = "nextCursorMark", default)]
    pub next_cursor_mark: Option<String>,
    #[serde(rename = "resultList", default)]
    pub result_list: Option<RawResultList>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawResultList {
    #[serde(default)]
    pub result: Vec<RawResult>,
}

/// One upstream result entry. Every field is independently optional;
/// omissions are normalized to empty markers, never treated as errors.
#[derive(Debug, Deserialize)]
pub(crate) struct RawResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub pmid: Option<String>,
    #[serde(default)]
    pub pmcid: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "authorString", default)]
    pub author_string: Option<String>,
    #[serde(rename = "journalTitle", default)]
    pub journal_title: Option<String>,
    #[serde(rename = "firstPublicationDate", default)]
    pub first_publication_date: Option<String>,
    #[serde(rename = "pubYear", default)]
    pub pub_year: Option<String>,
    #[serde(rename = "citedByCount", default, deserialize_with = "lenient_u32")]
    pub cited_by_count: Option<u32>,
    #[serde(rename = "isOpenAccess", default, deserialize_with = "bool_yn")]
    pub is_open_access: bool,
    #[serde(rename = "hasTextMinedTerms", default, deserialize_with = "bool_yn")]
    pub has_full_text: bool,
}

/// Deserialize a boolean from the upstream "Y"/"N" string convention.
/// Missing or anything other than "Y" is false.
fn bool_yn<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.is_some_and(|v| v == "Y"))
}

/// Deserialize a count that arrives as a JSON number or an XML text node
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u32),
        Text(String),
    }

    let value: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

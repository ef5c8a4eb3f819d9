//! Author disambiguation over delimited author strings
//!
//! Europe PMC identifies authors by name strings only, so publications from
//! different people under similar names collide. Given a target name and a
//! candidate pool, [`AuthorMatcher`] scores the most plausible author entry
//! of each candidate against the target and keeps those above a threshold.

pub mod similarity;

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::error::{EuropePmcError, Result};
use crate::europepmc::models::{MatchResult, PublicationRecord};

/// Honorifics and suffixes that carry no identity signal
const NAME_NOISE_WORDS: &[&str] = &[
    "jr", "sr", "ii", "iii", "iv", "phd", "md", "dr", "prof", "professor",
];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.,;]").unwrap());

/// Scores candidate author strings against a target name
///
/// # Example
///
/// ```
/// use europepmc_client::AuthorMatcher;
///
/// let matcher = AuthorMatcher::new();
/// let score = matcher.score_names("Smith J", "Smith, John A");
/// assert!(score >= 70);
/// ```
#[derive(Debug, Clone)]
pub struct AuthorMatcher {
    /// Bonus added when the target's initials appear in order in the
    /// candidate's initials. An upstream heuristic constant with no stated
    /// derivation; kept configurable rather than hardcoded.
    initials_bonus: u8,
}

impl AuthorMatcher {
    /// Create a matcher with the default initials bonus (+10)
    pub fn new() -> Self {
        Self { initials_bonus: 10 }
    }

    /// Override the initials bonus
    pub fn with_initials_bonus(mut self, bonus: u8) -> Self {
        self.initials_bonus = bonus;
        self
    }

    /// Score a single candidate name against the target, in [0, 100].
    ///
    /// Takes the maximum of four similarity measures: any one measure
    /// catching a strong match (reordered tokens, initials-only forms) is
    /// sufficient evidence of identity, and averaging would penalize
    /// matches only one measure detects well.
    pub fn score_names(&self, target: &str, candidate: &str) -> u8 {
        let norm_target = normalize_author_name(target);
        let norm_candidate = normalize_author_name(candidate);
        if norm_target.is_empty() || norm_candidate.is_empty() {
            return 0;
        }

        let base = similarity::ratio(&norm_target, &norm_candidate)
            .max(similarity::partial_ratio(&norm_target, &norm_candidate))
            .max(similarity::token_sort_ratio(&norm_target, &norm_candidate))
            .max(similarity::token_set_ratio(&norm_target, &norm_candidate));

        let target_initials = extract_initials(&norm_target);
        let candidate_initials = extract_initials(&norm_candidate);
        if initials_in_order(&target_initials, &candidate_initials) {
            base.saturating_add(self.initials_bonus).min(100)
        } else {
            base
        }
    }

    /// Rank candidate publications by author similarity to `target_name`.
    ///
    /// For each candidate the best-scoring entry of its author string is the
    /// matched substring. Candidates below `threshold` are discarded; the
    /// survivors are sorted by score descending, ties keeping the original
    /// candidate order. A pure function of its inputs.
    ///
    /// # Errors
    ///
    /// [`EuropePmcError::InvalidThreshold`] when `threshold` is outside
    /// [50, 100]. An empty candidate pool is not an error and yields an
    /// empty result.
    #[instrument(skip(self, candidates), fields(target = %target_name, threshold))]
    pub fn rank<I>(&self, target_name: &str, candidates: I, threshold: u8) -> Result<Vec<MatchResult>>
    where
        I: IntoIterator<Item = PublicationRecord>,
    {
        if !(50..=100).contains(&threshold) {
            return Err(EuropePmcError::InvalidThreshold { threshold });
        }

        let mut matches: Vec<MatchResult> = candidates
            .into_iter()
            .filter_map(|record| {
                let (entry, score) = self.best_author_entry(target_name, &record.author_string)?;
                (score >= threshold).then(|| MatchResult {
                    record,
                    score,
                    matched_author: entry,
                })
            })
            .collect();

        // Stable: ties keep original candidate order
        matches.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(matched = matches.len(), "Author ranking complete");
        Ok(matches)
    }

    /// Pick the best-scoring author entry from a delimited author string.
    /// Original casing of the entry is preserved in the result.
    fn best_author_entry(&self, target: &str, author_string: &str) -> Option<(String, u8)> {
        split_author_entries(author_string)
            .map(|entry| (entry.to_string(), self.score_names(target, entry)))
            .max_by_key(|(_, score)| *score)
    }
}

impl Default for AuthorMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Split an author string into individual author entries.
///
/// Semicolons delimit entries in `"Last, First"` style strings; when no
/// semicolon is present the upstream `"Watt FM, Fujiwara H."` comma style is
/// assumed.
fn split_author_entries(author_string: &str) -> impl Iterator<Item = &str> {
    let delimiter = if author_string.contains(';') { ';' } else { ',' };
    author_string
        .split(delimiter)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Normalize a name for comparison: lowercase, punctuation and noise words
/// stripped, whitespace collapsed. Used only for scoring; the original
/// casing is what callers see.
pub fn normalize_author_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let depunctuated = PUNCTUATION.replace_all(&lowered, " ");
    let collapsed = WHITESPACE.replace_all(depunctuated.trim(), " ");

    collapsed
        .split(' ')
        .filter(|word| !word.is_empty() && !NAME_NOISE_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase initials of each word in a name
pub fn extract_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Whether every initial of `target` appears in `candidate` in order
/// (subsequence match)
fn initials_in_order(target: &str, candidate: &str) -> bool {
    if target.is_empty() {
        return false;
    }
    let mut candidate_chars = candidate.chars();
    target
        .chars()
        .all(|t| candidate_chars.any(|c| c == t))
}

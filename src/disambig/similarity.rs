//! Fuzzy string similarity measures for author matching
//!
//! Four measures in the fuzzywuzzy family, each returning a score in
//! [0, 100], built on `strsim`'s normalized Levenshtein ratio. Any single
//! measure scoring high is strong evidence of identity, so callers combine
//! them with max rather than an average.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Direct similarity ratio between two strings
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 100 } else { 0 };
    }
    (normalized_levenshtein(a, b) * 100.0).round() as u8
}

/// Substring-tolerant ratio: the best alignment of the shorter string
/// against any equal-length window of the longer one
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 100 } else { 0 };
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let short_len = shorter.chars().count();
    let long_chars: Vec<char> = longer.chars().collect();

    let mut best = 0u8;
    for start in 0..=(long_chars.len() - short_len) {
        let window: String = long_chars[start..start + short_len].iter().collect();
        best = best.max(ratio(shorter, &window));
        if best == 100 {
            break;
        }
    }
    best
}

/// Token-order-insensitive ratio: compare with tokens sorted
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Token-set-insensitive ratio: compare around the shared token core, so
/// extra tokens on one side (middle names, suffixes) cost little
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection = join(tokens_a.intersection(&tokens_b));
    let only_a = join(tokens_a.difference(&tokens_b));
    let only_b = join(tokens_b.difference(&tokens_a));

    let combined_a = join_nonempty(&intersection, &only_a);
    let combined_b = join_nonempty(&intersection, &only_b);

    ratio(&intersection, &combined_a)
        .max(ratio(&intersection, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a>(iter: impl Iterator<Item = &'a &'a str>) -> String {
    iter.copied().collect::<Vec<_>>().join(" ")
}

fn join_nonempty(base: &str, extra: &str) -> String {
    match (base.is_empty(), extra.is_empty()) {
        (true, _) => extra.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base} {extra}"),
    }
}

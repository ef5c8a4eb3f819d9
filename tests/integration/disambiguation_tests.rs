//! Author disambiguation integration tests

use europepmc_client::{AuthorMatcher, EuropePmcError, MatchResult, PublicationRecord};
use rstest::rstest;

fn record(id: &str, author_string: &str) -> PublicationRecord {
    PublicationRecord {
        id: id.to_string(),
        source: "MED".to_string(),
        pmid: Some(id.to_string()),
        pmcid: None,
        doi: None,
        title: format!("Publication {id}"),
        author_string: author_string.to_string(),
        journal: "Nature".to_string(),
        publication_date: "2021-01-29".to_string(),
        citation_count: Some(3),
        is_open_access: false,
        has_full_text: false,
    }
}

#[test]
fn test_initials_form_matches_full_name() {
    let matcher = AuthorMatcher::new();
    let matches = matcher
        .rank(
            "Smith J",
            vec![record("1", "Smith, John A; Doe, Jane")],
            70,
        )
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].matched_author, "Smith, John A");
    assert!(matches[0].score >= 70, "score was {}", matches[0].score);
}

#[test]
fn test_wrong_author_in_same_record_does_not_match() {
    let matcher = AuthorMatcher::new();
    let matches = matcher
        .rank("Doe Jane", vec![record("1", "Smith, John A; Doe, Jane")], 70)
        .unwrap();

    // Matches, but against the right entry
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].matched_author, "Doe, Jane");
}

#[test]
fn test_threshold_partitions_candidates() {
    let matcher = AuthorMatcher::new();
    let candidates = vec![
        record("1", "Watt, Fiona M"),
        record("2", "Watts, Duncan J"),
        record("3", "Nguyen, Trang"),
    ];

    let strict = matcher.rank("Watt FM", candidates.clone(), 90).unwrap();
    let lenient = matcher.rank("Watt FM", candidates, 50).unwrap();

    assert!(strict.len() <= lenient.len());
    assert!(strict.iter().all(|m| m.score >= 90));
    assert!(lenient.iter().any(|m| m.record.id == "1"));
    assert!(lenient.iter().all(|m| m.record.id != "3"));
}

#[rstest]
#[case(0)]
#[case(49)]
#[case(101)]
fn test_out_of_range_threshold_is_an_error(#[case] threshold: u8) {
    let matcher = AuthorMatcher::new();
    let err = matcher
        .rank("Smith J", vec![record("1", "Smith J.")], threshold)
        .unwrap_err();
    assert!(matches!(err, EuropePmcError::InvalidThreshold { .. }));
}

#[rstest]
#[case(50)]
#[case(80)]
#[case(100)]
fn test_boundary_thresholds_are_accepted(#[case] threshold: u8) {
    let matcher = AuthorMatcher::new();
    assert!(matcher
        .rank("Smith J", vec![record("1", "Smith J.")], threshold)
        .is_ok());
}

#[test]
fn test_results_sorted_by_score_descending() {
    let matcher = AuthorMatcher::new();
    let candidates = vec![
        record("1", "Smyth, Jon"),
        record("2", "Smith, John A"),
        record("3", "Smith J."),
    ];
    let matches = matcher.rank("Smith J", candidates, 50).unwrap();

    assert_eq!(matches.len(), 3);
    for pair in matches.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    // The weakest match sorts last; the two exact-form matches tie at the
    // top and keep their pool order
    assert_eq!(matches.last().unwrap().record.id, "1");
    assert_eq!(matches[0].record.id, "2");
}

#[test]
fn test_ranking_is_deterministic() {
    let matcher = AuthorMatcher::new();
    let candidates: Vec<PublicationRecord> = (0..20)
        .map(|i| {
            let name = if i % 2 == 0 { "Watt FM" } else { "Fujiwara H" };
            record(&i.to_string(), name)
        })
        .collect();

    let first = matcher.rank("Fiona Watt", candidates.clone(), 60).unwrap();
    let second = matcher.rank("Fiona Watt", candidates, 60).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_pool_is_not_an_error() {
    let matcher = AuthorMatcher::new();
    let matches: Vec<MatchResult> = matcher.rank("Smith J", Vec::new(), 80).unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_record_without_authors_is_filtered() {
    let matcher = AuthorMatcher::new();
    let matches = matcher.rank("Smith J", vec![record("1", "")], 50).unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_honorifics_and_suffixes_ignored() {
    let matcher = AuthorMatcher::new();
    let score = matcher.score_names("John Smith", "Dr. John Smith Jr., PhD");
    assert_eq!(score, 100);
}

#[test]
fn test_reordered_name_still_matches() {
    let matcher = AuthorMatcher::new();
    assert!(matcher.score_names("Fiona Watt", "Watt, Fiona") >= 90);
}

#[test]
fn test_semicolon_and_comma_author_strings_both_split() {
    let matcher = AuthorMatcher::new();

    let semicolons = matcher
        .rank("Fujiwara H", vec![record("1", "Watt, Fiona M; Fujiwara, Hironobu")], 60)
        .unwrap();
    assert_eq!(semicolons[0].matched_author, "Fujiwara, Hironobu");

    let commas = matcher
        .rank("Fujiwara H", vec![record("1", "Watt FM, Fujiwara H.")], 60)
        .unwrap();
    assert_eq!(commas[0].matched_author, "Fujiwara H.");
}

#[test]
fn test_scores_never_exceed_100() {
    let matcher = AuthorMatcher::new().with_initials_bonus(90);
    let matches = matcher
        .rank("Watt FM", vec![record("1", "Watt FM"), record("2", "Watt, Fiona M")], 50)
        .unwrap();
    assert!(matches.iter().all(|m| m.score <= 100));
}

//! End-to-end search API tests against a mock upstream

use europepmc_client::{
    ClientConfig, EuropePmcClient, EuropePmcError, Pagination, ResultType, SearchFilters,
    SortOrder, SourceDb,
};
use wiremock::matchers::{method, path, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTHOR_PAYLOAD: &str = r#"{
    "hitCount": 3,
    "resultList": {
        "result": [
            {
                "id": "1",
                "source": "MED",
                "title": "Epidermal homeostasis",
                "authorString": "Watt FM, Fujiwara H.",
                "firstPublicationDate": "2021-01-29"
            },
            {
                "id": "2",
                "source": "MED",
                "title": "Small-world networks",
                "authorString": "Watts DJ, Strogatz SH.",
                "firstPublicationDate": "1998-06-04"
            },
            {
                "id": "3",
                "source": "MED",
                "title": "Unrelated work",
                "authorString": "Nguyen T.",
                "firstPublicationDate": "2020-05-01"
            }
        ]
    }
}"#;

fn client_for(base_url: &str) -> EuropePmcClient {
    EuropePmcClient::with_config(
        ClientConfig::new()
            .with_base_url(base_url)
            .with_rate_limit(1000.0)
            .with_burst(100),
    )
}

#[tokio::test]
async fn test_search_sends_expected_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param_contains("query", "OPEN_ACCESS:Y"))
        .and(query_param_contains("query", "cancer"))
        .and(query_param("format", "json"))
        .and(query_param("pageSize", "10"))
        .and(query_param("resultType", "lite"))
        .and(query_param("sort", "date"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"hitCount": 0}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let filters = SearchFilters {
        open_access_only: true,
        ..Default::default()
    };
    client_for(&server.uri())
        .search("cancer", &filters, &Pagination::new(10), Some(SortOrder::Date))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cursor_mark_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("cursorMark", "AoIIP4AAACc0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"hitCount": 0}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let pagination = Pagination {
        page_size: 25,
        cursor_mark: Some("AoIIP4AAACc0".to_string()),
        result_type: ResultType::Lite,
    };
    client_for(&server.uri())
        .search("cancer", &SearchFilters::default(), &pagination, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_page_size_never_reaches_the_wire() {
    let server = MockServer::start().await;
    // No mocks mounted: a request would fail loudly

    let err = client_for(&server.uri())
        .search("x", &SearchFilters::default(), &Pagination::new(1001), None)
        .await
        .unwrap_err();
    assert!(matches!(err, EuropePmcError::InvalidPageSize { size: 1001 }));
}

#[tokio::test]
async fn test_out_of_range_threshold_never_reaches_the_wire() {
    let server = MockServer::start().await;

    // A mounted mock records any request that does go out
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(AUTHOR_PAYLOAD, "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    for threshold in [0u8, 49, 101] {
        let err = client
            .search_by_author("Watt FM", None, Some(threshold), &Pagination::new(10))
            .await
            .unwrap_err();
        assert!(matches!(err, EuropePmcError::InvalidThreshold { .. }));
    }

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "rejected thresholds still issued {} requests", requests.len());
}

#[tokio::test]
async fn test_search_by_author_filters_and_ranks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param_contains("query", r#"AUTH:"Watt FM""#))
        .and(query_param("sort", "relevance"))
        // Over-fetch: double the requested page size
        .and(query_param("pageSize", "20"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(AUTHOR_PAYLOAD, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let matches = client_for(&server.uri())
        .search_by_author("Watt FM", None, Some(80), &Pagination::new(10))
        .await
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record.id, "1");
    assert_eq!(matches[0].matched_author, "Watt FM");
    assert!(matches[0].score >= 80);
}

#[tokio::test]
async fn test_search_by_author_with_additional_terms() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param_contains("query", "skin"))
        .and(query_param_contains("query", r#"AUTH:"Watt FM""#))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(AUTHOR_PAYLOAD, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let matches = client_for(&server.uri())
        .search_by_author("Watt FM", Some("skin"), Some(50), &Pagination::new(10))
        .await
        .unwrap();
    assert!(!matches.is_empty());
}

#[tokio::test]
async fn test_search_by_author_truncates_to_page_size() {
    let server = MockServer::start().await;

    // 2 results both matching the target perfectly
    let payload = r#"{
        "hitCount": 2,
        "resultList": {"result": [
            {"id": "1", "source": "MED", "authorString": "Watt FM."},
            {"id": "2", "source": "MED", "authorString": "Watt FM."}
        ]}
    }"#;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("pageSize", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(payload, "application/json"))
        .mount(&server)
        .await;

    let matches = client_for(&server.uri())
        .search_by_author("Watt FM", None, Some(80), &Pagination::new(1))
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
}

#[tokio::test]
async fn test_get_publication_details_found() {
    let server = MockServer::start().await;

    let payload = r#"{
        "hitCount": 1,
        "resultList": {"result": [
            {"id": "33515491", "source": "MED", "title": "Stem cell renewal"}
        ]}
    }"#;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param_contains("query", r#"EXT_ID:"33515491""#))
        .and(query_param_contains("query", "SRC:MED"))
        .and(query_param("pageSize", "1"))
        .and(query_param("resultType", "core"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(payload, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server.uri())
        .get_publication_details(SourceDb::Med, "33515491")
        .await
        .unwrap();
    assert_eq!(record.unwrap().title, "Stem cell renewal");
}

#[tokio::test]
async fn test_get_publication_details_missing_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"hitCount": 0}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let record = client_for(&server.uri())
        .get_publication_details(SourceDb::Med, "0000000")
        .await
        .unwrap();
    assert!(record.is_none());
}

//! Integration tests for docs-query
//!
//! These tests exercise URI composition end-to-end through the public API.

use docs_query::config::{load_config, Config, DEFAULT_FEED_URI};
use docs_query::query::MockQuery;
use docs_query::{DocumentsQuery, EmailPrincipal, Query, QueryError, QueryParameters};

const FEED: &str = "https://docs.google.com/feeds/documents/private/full";

const FILTER_PARAMS: [&str; 5] = ["writer=", "reader=", "title=", "showdeleted=", "showfolders="];

/// A query with every documents filter populated
fn fully_loaded_query() -> DocumentsQuery {
    let mut query = DocumentsQuery::with_limits(Some("quarterly"), 1, 10);
    query.set_folder_id(Some("0B1234"));
    query.set_title(Some("Annual Report"), true);
    query.set_show_deleted(true);
    query.set_show_folders(true);
    query.add_collaborator("a@x.com").unwrap();
    query.add_collaborator("b@y.com").unwrap();
    query.add_reader("r@z.com").unwrap();
    query
}

#[test]
fn test_full_query_uri() {
    let query = fully_loaded_query();

    assert_eq!(
        query.compose_uri(FEED),
        "https://docs.google.com/feeds/documents/private/full/folder%3A0B1234\
         ?q=quarterly&start-index=1&max-results=10\
         &writer=a%40x.com;b%40y.com&reader=r%40z.com\
         &title=Annual%20Report&title-exact=true\
         &showdeleted=true&showfolders=true"
    );
}

#[test]
fn test_entry_id_suppresses_all_filters() {
    let mut query = fully_loaded_query();
    query.base_mut().set_entry_id(Some("document:abc"));

    let uri = query.compose_uri(FEED);
    for param in FILTER_PARAMS {
        assert!(!uri.contains(param), "{} found in {}", param, uri);
    }
    assert!(!uri.contains("folder%3A"));
    assert_eq!(uri, format!("{}/document%3Aabc", FEED));
}

#[test]
fn test_folder_segment_before_query_string() {
    let mut query = DocumentsQuery::new(Some("x"));
    query.set_folder_id(Some("abc"));

    let uri = query.compose_uri(FEED);
    let folder_pos = uri.find("/folder%3Aabc").unwrap();
    let query_pos = uri.find('?').unwrap();
    assert!(folder_pos < query_pos);
}

#[test]
fn test_single_writer_parameter_in_order() {
    let mut query = DocumentsQuery::new(None);
    query.add_collaborator("first one@x.com").unwrap();
    query.add_collaborator("second@y.com").unwrap();

    let uri = query.compose_uri(FEED);
    assert_eq!(uri.matches("writer=").count(), 1);
    assert!(uri.contains("writer=first%20one%40x.com;second%40y.com&"));
}

#[test]
fn test_visibility_flags_always_present() {
    let mut configs = vec![DocumentsQuery::new(None), fully_loaded_query()];

    let mut only_deleted = DocumentsQuery::new(None);
    only_deleted.set_show_deleted(true);
    configs.push(only_deleted);

    let mut only_folders = DocumentsQuery::with_limits(None, 3, 0);
    only_folders.set_show_folders(true);
    configs.push(only_folders);

    for query in &configs {
        let uri = query.compose_uri(FEED);
        assert!(
            uri.contains(&format!("showdeleted={}", query.show_deleted())),
            "{}",
            uri
        );
        assert!(
            uri.ends_with(&format!("&showfolders={}", query.show_folders())),
            "{}",
            uri
        );
    }
}

#[test]
fn test_compose_twice_is_identical() {
    let query = fully_loaded_query();
    assert_eq!(query.compose_uri(FEED), query.compose_uri(FEED));
}

#[test]
fn test_annual_report_scenario() {
    let mut query = DocumentsQuery::new(None);
    query.set_title(Some("Annual Report"), true);

    let suffix = "title=Annual%20Report&title-exact=true&showdeleted=false&showfolders=false";
    assert_eq!(query.compose_uri(FEED), format!("{}?{}", FEED, suffix));

    // Preceded by a base parameter the separator becomes `&`
    query.base_mut().set_q(Some("q"));
    assert_eq!(query.compose_uri(FEED), format!("{}?q=q&{}", FEED, suffix));
}

#[test]
fn test_reader_scenario() {
    let mut query = DocumentsQuery::new(None);
    query.add_reader("a@x.com").unwrap();
    query.add_reader("b@y.com").unwrap();

    assert!(query
        .compose_uri(FEED)
        .contains("reader=a%40x.com;b%40y.com"));
}

#[test]
fn test_empty_collaborator_rejected() {
    let mut query = DocumentsQuery::new(None);
    query.add_collaborator("keep@x.com").unwrap();

    let err = query.add_collaborator("").unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));
    assert_eq!(query.collaborator_addresses().len(), 1);
    assert_eq!(query.collaborator_addresses()[0].address(), "keep@x.com");
}

#[test]
fn test_empty_lists_emit_nothing() {
    let query = DocumentsQuery::new(None);
    let uri = query.compose_uri(FEED);
    assert!(!uri.contains("writer="));
    assert!(!uri.contains("reader="));
}

#[test]
fn test_feed_with_existing_query_string() {
    let mut query = DocumentsQuery::new(None);
    query.set_show_folders(true);

    assert_eq!(
        query.compose_uri("http://localhost/feeds/documents?v=2"),
        "http://localhost/feeds/documents?v=2&showdeleted=false&showfolders=true"
    );
}

#[test]
fn test_non_ascii_title_passes_through() {
    let mut query = DocumentsQuery::new(None);
    query.set_title(Some("Café menu"), false);

    assert!(query.compose_uri(FEED).contains("title=Café%20menu&"));
}

#[test]
fn test_custom_base_query() {
    let mut query = DocumentsQuery::with_base(MockQuery::new().with_param("alt", "json"));
    query.add_reader("a@x.com").unwrap();

    assert_eq!(
        query.compose_uri(FEED),
        format!(
            "{}?alt=json&reader=a%40x.com&showdeleted=false&showfolders=false",
            FEED
        )
    );
}

#[test]
fn test_principal_factory() {
    assert!(EmailPrincipal::new("", "reader", None, false).is_err());

    let principal =
        EmailPrincipal::new("a@x.com", "collaborator", Some("A".to_string()), false).unwrap();
    assert_eq!(principal.address(), "a@x.com");
    assert_eq!(principal.relation(), "collaborator");
}

#[test]
fn test_base_query_alone() {
    let query = Query::with_limits(Some("a b"), 5, 20);
    assert_eq!(
        query.compose_uri(FEED),
        format!("{}?q=a%20b&start-index=5&max-results=20", FEED)
    );
}

#[test]
fn test_config_drives_feed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docs-query.toml");

    let mut config = Config::default();
    assert_eq!(config.feed.base_uri, DEFAULT_FEED_URI);
    config.feed.base_uri = "http://localhost:8080/feeds/documents".to_string();
    config.save(&path).unwrap();

    let loaded = load_config(Some(&path)).unwrap();
    let query = DocumentsQuery::new(None);
    assert_eq!(
        query.compose_uri(&loaded.feed.base_uri),
        "http://localhost:8080/feeds/documents?showdeleted=false&showfolders=false"
    );
}

//! Tests for pagination module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::http::{Headers, HttpResponse};
use crate::testing::{json_page, ScriptedTransport};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_case::test_case;
use url::Url;

fn base_url() -> Url {
    Url::parse("http://x/api/zones?per_page=50").unwrap()
}

fn link(next: Option<u32>, last: Option<u32>) -> String {
    let mut parts = vec!["<http://x/api/zones?page=1>; rel=\"first\"".to_string()];
    if let Some(n) = next {
        parts.push(format!("<http://x/api/zones?page={n}>; rel=\"next\""));
    }
    if let Some(n) = last {
        parts.push(format!("<http://x/api/zones?page={n}>; rel=\"last\""));
    }
    parts.join(", ")
}

fn request_urls(transport: &ScriptedTransport) -> Vec<String> {
    transport
        .requests()
        .iter()
        .map(|r| r.url.to_string())
        .collect()
}

// ============================================================================
// Link Header Tests
// ============================================================================

#[test]
fn test_parse_link_header_next_and_last() {
    let links = parse_link_header(r#"<http://x/?page=2>; rel="next", <http://x/?page=5>; rel="last""#);
    assert_eq!(
        links,
        vec![
            PaginationLink {
                relation: LinkRelation::Next,
                url: "http://x/?page=2".to_string(),
            },
            PaginationLink {
                relation: LinkRelation::Last,
                url: "http://x/?page=5".to_string(),
            },
        ]
    );
}

#[test_case("" ; "empty")]
#[test_case("   " ; "whitespace")]
#[test_case("<http://x/?page=2>" ; "missing rel")]
#[test_case("<http://x/?page=2>; title=\"two\"" ; "no rel parameter")]
#[test_case("<http://x/?page=2>; rel=\"self\"" ; "unknown relation")]
#[test_case("garbage, more garbage" ; "no separators")]
fn test_parse_link_header_yields_nothing(header: &str) {
    assert!(parse_link_header(header).is_empty());
}

#[test]
fn test_parse_link_header_skips_malformed_segment() {
    let links = parse_link_header(r#"<http://x/?page=1>, <http://x/?page=3>; rel="prev""#);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].relation, LinkRelation::Prev);
    assert_eq!(links[0].url, "http://x/?page=3");
}

#[test_case(r#"<a>; rel="first""#, LinkRelation::First ; "first")]
#[test_case(r#"<a>; rel="last""#, LinkRelation::Last ; "last")]
#[test_case(r#"<a>; rel="prev""#, LinkRelation::Prev ; "prev")]
#[test_case(r#"<a>; rel="next""#, LinkRelation::Next ; "next")]
#[test_case("<a>; rel=next", LinkRelation::Next ; "unquoted")]
#[test_case("<a>;rel='next'", LinkRelation::Next ; "single quoted no space")]
#[test_case(r#"<a>; type="text/html"; rel="last""#, LinkRelation::Last ; "rel not second")]
fn test_parse_link_header_relations(header: &str, expected: LinkRelation) {
    let links = parse_link_header(header);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].relation, expected);
    assert_eq!(links[0].url, "a");
}

#[test]
fn test_find_link() {
    let links = parse_link_header(&link(Some(2), Some(9)));
    assert_eq!(
        find_link(&links, LinkRelation::Last).map(|l| l.url.as_str()),
        Some("http://x/api/zones?page=9")
    );
    assert!(find_link(&links, LinkRelation::Prev).is_none());
}

// ============================================================================
// Metadata / PageStamp Tests
// ============================================================================

#[test]
fn test_metadata_zero_means_unknown() {
    let meta = PaginationMetadata {
        current_page: 1,
        total_pages: 0,
        total_objects: 0,
    };
    assert_eq!(meta.known_total_pages(), None);
    assert_eq!(meta.known_total_objects(), None);

    let meta = PaginationMetadata {
        current_page: 2,
        total_pages: 4,
        total_objects: 180,
    };
    assert_eq!(meta.known_total_pages(), Some(4));
    assert_eq!(meta.known_total_objects(), Some(180));
}

#[test]
fn test_query_page_stamp() {
    let mut url = base_url();
    QueryPageStamp::default().stamp(1, &mut url);
    assert_eq!(url.as_str(), "http://x/api/zones?per_page=50&page=1");

    QueryPageStamp::default().stamp(2, &mut url);
    assert_eq!(url.as_str(), "http://x/api/zones?per_page=50&page=2");

    QueryPageStamp::new("page_num").stamp(7, &mut url);
    assert_eq!(url.as_str(), "http://x/api/zones?per_page=50&page=2&page_num=7");
}

// ============================================================================
// Page Fetcher Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_page_decodes_and_reads_headers() {
    let transport = ScriptedTransport::new().respond(json_page(
        r#"["a", "b"]"#,
        Some(&link(Some(2), Some(4))),
        Some("7"),
    ));

    let page: PageResult<String> = fetch_page(&transport, &base_url(), &Headers::accept_json())
        .await
        .unwrap();

    assert_eq!(page.elements, vec!["a", "b"]);
    assert!(page.has_next);
    assert_eq!(page.total_pages, Some(4));
    assert_eq!(page.total_objects, Some(7));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.get("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_fetch_page_headers_case_insensitive() {
    let response = HttpResponse::new(200)
        .body("[1]")
        .header("link", r#"</api/zones?page=3>; rel="last""#)
        .header("x-total-count", "12");
    let transport = ScriptedTransport::new().respond(response);

    let page: PageResult<u32> = fetch_page(&transport, &base_url(), &Headers::new())
        .await
        .unwrap();

    assert!(!page.has_next);
    // Relative last link resolved against the request URL
    assert_eq!(page.total_pages, Some(3));
    assert_eq!(page.total_objects, Some(12));
}

#[tokio::test]
async fn test_fetch_page_missing_or_bad_totals() {
    let transport = ScriptedTransport::new()
        .respond(json_page("[]", None, None))
        .respond(json_page(
            "[]",
            Some(r#"<http://x/?page=many>; rel="last""#),
            Some("lots"),
        ));

    let page: PageResult<u32> = fetch_page(&transport, &base_url(), &Headers::new())
        .await
        .unwrap();
    assert_eq!(page.total_pages, None);
    assert_eq!(page.total_objects, None);

    let page: PageResult<u32> = fetch_page(&transport, &base_url(), &Headers::new())
        .await
        .unwrap();
    assert_eq!(page.total_pages, None);
    assert_eq!(page.total_objects, None);
}

#[tokio::test]
async fn test_fetch_page_404_is_not_found() {
    let transport = ScriptedTransport::new().respond(HttpResponse::new(404).body("Not Found"));
    let result = fetch_page::<u32>(&transport, &base_url(), &Headers::new()).await;
    assert!(matches!(result, Err(Error::ResourceNotFound)));
}

#[tokio::test]
async fn test_fetch_page_server_message() {
    let transport =
        ScriptedTransport::new().respond(HttpResponse::new(401).body("Invalid API token"));
    match fetch_page::<u32>(&transport, &base_url(), &Headers::new()).await {
        Err(Error::ServerMessage(msg)) => assert_eq!(msg, "Invalid API token"),
        other => panic!("Expected ServerMessage, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_page_empty_body() {
    let transport = ScriptedTransport::new().respond(HttpResponse::new(200));
    let result = fetch_page::<u32>(&transport, &base_url(), &Headers::new()).await;
    assert!(matches!(result, Err(Error::EmptyResponseBody)));
}

#[tokio::test]
async fn test_fetch_page_decode_failure_keeps_body() {
    let transport = ScriptedTransport::new().respond(json_page(r#"{"error": "nope"}"#, None, None));
    let err = fetch_page::<u32>(&transport, &base_url(), &Headers::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert_eq!(err.raw_body(), Some(r#"{"error": "nope"}"#));
}

#[tokio::test]
async fn test_fetch_page_transport_failure() {
    let transport = ScriptedTransport::new().fail("connection reset");
    match fetch_page::<u32>(&transport, &base_url(), &Headers::new()).await {
        Err(Error::Transport { detail }) => assert_eq!(detail, "connection reset"),
        other => panic!("Expected Transport, got {other:?}"),
    }
}

// ============================================================================
// PaginatedSequence Tests
// ============================================================================

#[tokio::test]
async fn test_sequence_is_lazy() {
    let transport = ScriptedTransport::new().into_arc();
    let seq: PaginatedSequence<String> =
        PaginatedSequence::new(base_url(), AuthConfig::None, transport.clone());

    assert_eq!(transport.request_count(), 0);
    assert!(!seq.has_fetched());
    assert_eq!(seq.total_pages(), None);
    assert_eq!(seq.total_objects(), None);
}

#[tokio::test]
async fn test_sequence_three_pages_in_order() {
    let transport = ScriptedTransport::new()
        .respond(json_page(r#"["a","b"]"#, Some(&link(Some(2), Some(3))), Some("5")))
        .respond(json_page(r#"["c","d"]"#, Some(&link(Some(3), Some(3))), Some("5")))
        .respond(json_page(r#"["e"]"#, Some(&link(None, Some(3))), Some("5")))
        .into_arc();

    let mut seq = PaginatedSequence::<String>::new(base_url(), AuthConfig::None, transport.clone());

    let mut seen = Vec::new();
    while let Some((element, meta)) = seq.next().await.unwrap() {
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.total_objects, 5);
        seen.push((element, meta.current_page));
    }

    assert_eq!(
        seen,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 1),
            ("c".to_string(), 2),
            ("d".to_string(), 2),
            ("e".to_string(), 3),
        ]
    );
    assert_eq!(
        request_urls(&transport),
        vec![
            "http://x/api/zones?per_page=50&page=1",
            "http://x/api/zones?per_page=50&page=2",
            "http://x/api/zones?per_page=50&page=3",
        ]
    );
    assert!(seq.is_exhausted());
}

#[tokio::test]
async fn test_sequence_terminal_state_is_idempotent() {
    let transport = ScriptedTransport::new()
        .respond(json_page(r#"["a"]"#, None, None))
        .into_arc();

    let mut seq = PaginatedSequence::<String>::new(base_url(), AuthConfig::None, transport.clone());

    assert!(seq.next().await.unwrap().is_some());
    for _ in 0..3 {
        assert!(seq.next().await.unwrap().is_none());
    }
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_sequence_empty_first_page() {
    // A next link on an empty first page is not followed
    let transport = ScriptedTransport::new()
        .respond(json_page("[]", Some(&link(Some(2), None)), Some("0")))
        .into_arc();

    let mut seq = PaginatedSequence::<String>::new(base_url(), AuthConfig::None, transport.clone());

    assert!(seq.next().await.unwrap().is_none());
    assert!(seq.next().await.unwrap().is_none());
    assert_eq!(transport.request_count(), 1);

    // Fetch happened, and the server confirmed zero objects
    assert!(seq.has_fetched());
    assert_eq!(seq.total_objects(), Some(0));
}

#[tokio::test]
async fn test_sequence_empty_later_page_terminates() {
    let transport = ScriptedTransport::new()
        .respond(json_page(r#"["a"]"#, Some(&link(Some(2), None)), None))
        .respond(json_page("[]", Some(&link(Some(3), None)), None))
        .into_arc();

    let mut seq = PaginatedSequence::<String>::new(base_url(), AuthConfig::None, transport.clone());

    assert_eq!(seq.next().await.unwrap().unwrap().0, "a");
    assert!(seq.next().await.unwrap().is_none());
    assert!(seq.next().await.unwrap().is_none());
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_sequence_total_pages_fixed_once_known() {
    let transport = ScriptedTransport::new()
        .respond(json_page(r#"["a"]"#, Some(&link(Some(2), None)), None))
        .respond(json_page(r#"["b"]"#, Some(&link(Some(3), Some(4))), None))
        .respond(json_page(r#"["c"]"#, Some(&link(None, Some(9))), Some("3")))
        .into_arc();

    let mut seq = PaginatedSequence::<String>::new(base_url(), AuthConfig::None, transport);

    let (_, meta) = seq.next().await.unwrap().unwrap();
    assert_eq!(meta.total_pages, 0);

    let (_, meta) = seq.next().await.unwrap().unwrap();
    assert_eq!(meta.total_pages, 4);
    assert_eq!(meta.total_objects, 0);

    let (_, meta) = seq.next().await.unwrap().unwrap();
    assert_eq!(meta.total_pages, 4);
    // Object counts are refreshed per page
    assert_eq!(meta.total_objects, 3);
}

#[tokio::test]
async fn test_sequence_retry_after_failed_page() {
    let transport = ScriptedTransport::new()
        .respond(json_page(r#"["a"]"#, Some(&link(Some(2), None)), None))
        .fail("timed out")
        .respond(json_page(r#"["b"]"#, None, None))
        .into_arc();

    let mut seq = PaginatedSequence::<String>::new(base_url(), AuthConfig::None, transport.clone());

    assert_eq!(seq.next().await.unwrap().unwrap().0, "a");

    let err = seq.next().await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
    assert_eq!(seq.current_page(), 1);
    assert!(!seq.is_exhausted());

    let (element, meta) = seq.next().await.unwrap().unwrap();
    assert_eq!(element, "b");
    assert_eq!(meta.current_page, 2);

    assert_eq!(
        request_urls(&transport),
        vec![
            "http://x/api/zones?per_page=50&page=1",
            "http://x/api/zones?per_page=50&page=2",
            "http://x/api/zones?per_page=50&page=2",
        ]
    );
}

#[tokio::test]
async fn test_sequence_first_page_error_is_retryable() {
    let transport = ScriptedTransport::new()
        .respond(HttpResponse::new(404))
        .respond(json_page(r#"["a"]"#, None, None))
        .into_arc();

    let mut seq = PaginatedSequence::<String>::new(base_url(), AuthConfig::None, transport);

    assert!(matches!(seq.next().await, Err(Error::ResourceNotFound)));
    assert!(!seq.has_fetched());

    let (element, meta) = seq.next().await.unwrap().unwrap();
    assert_eq!(element, "a");
    assert_eq!(meta.current_page, 1);
}

#[tokio::test]
async fn test_sequence_decode_failure_surfaces() {
    let transport = ScriptedTransport::new()
        .respond(json_page(r#"[1, "two"]"#, None, None))
        .into_arc();

    let mut seq = PaginatedSequence::<u32>::new(base_url(), AuthConfig::None, transport);

    let err = seq.next().await.unwrap_err();
    assert_eq!(err.raw_body(), Some(r#"[1, "two"]"#));
}

#[tokio::test]
async fn test_sequence_sends_merged_headers() {
    let transport = ScriptedTransport::new()
        .respond(json_page("[1]", None, None))
        .into_arc();

    let defaults = Headers::accept_json().with("Authorization", "should be replaced");
    let mut seq = PaginatedSequence::<u32>::new(base_url(), AuthConfig::token("t0k"), transport.clone())
        .with_default_headers(defaults);

    seq.next().await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.headers.get("Accept"), Some("application/json"));
    assert_eq!(request.headers.get("Authorization"), Some("Token t0k"));
}

#[tokio::test]
async fn test_sequence_custom_page_stamp() {
    let transport = ScriptedTransport::new()
        .respond(json_page("[1]", Some(&link(Some(2), None)), None))
        .respond(json_page("[2]", None, None))
        .into_arc();

    let mut seq = PaginatedSequence::<u32>::new(base_url(), AuthConfig::None, transport.clone())
        .with_page_stamp(|page: u32, url: &mut Url| {
            url.set_path(&format!("/api/zones/page/{page}"));
        });

    let items: Vec<u32> = seq
        .collect_all()
        .await
        .unwrap()
        .into_iter()
        .map(|(n, _)| n)
        .collect();

    assert_eq!(items, vec![1, 2]);
    assert_eq!(
        request_urls(&transport),
        vec![
            "http://x/api/zones/page/1?per_page=50",
            "http://x/api/zones/page/2?per_page=50",
        ]
    );
}

#[tokio::test]
async fn test_sequence_cursor_index_tracks_page_position() {
    let transport = ScriptedTransport::new()
        .respond(json_page("[1,2]", Some(&link(Some(2), None)), None))
        .respond(json_page("[3]", None, None))
        .into_arc();

    let mut seq = PaginatedSequence::<u32>::new(base_url(), AuthConfig::None, transport);

    seq.next().await.unwrap();
    assert_eq!((seq.cursor_index(), seq.page_len()), (1, 2));
    seq.next().await.unwrap();
    assert_eq!((seq.cursor_index(), seq.page_len()), (2, 2));
    seq.next().await.unwrap();
    assert_eq!((seq.cursor_index(), seq.page_len()), (1, 1));
    assert_eq!(seq.current_page(), 2);
    assert_eq!(seq.url().as_str(), "http://x/api/zones?per_page=50&page=2");

    assert!(seq.next().await.unwrap().is_none());
    assert!(seq.cursor_index() <= seq.page_len());
}

#[tokio::test]
async fn test_sequence_into_stream() {
    let transport = ScriptedTransport::new()
        .respond(json_page("[1,2]", Some(&link(Some(2), Some(2))), None))
        .respond(json_page("[3]", None, None))
        .into_arc();

    let seq = PaginatedSequence::<u32>::new(base_url(), AuthConfig::None, transport);
    let items: Vec<(u32, PaginationMetadata)> = seq.into_stream().try_collect().await.unwrap();

    let pages: Vec<(u32, u32)> = items.iter().map(|(n, m)| (*n, m.current_page)).collect();
    assert_eq!(pages, vec![(1, 1), (2, 1), (3, 2)]);
}

#[tokio::test]
async fn test_sequence_stream_stops_on_error() {
    let transport = ScriptedTransport::new()
        .respond(json_page("[1]", Some(&link(Some(2), None)), None))
        .respond(HttpResponse::new(500).body("boom"))
        .into_arc();

    let seq = PaginatedSequence::<u32>::new(base_url(), AuthConfig::None, transport);
    let result: crate::Result<Vec<(u32, PaginationMetadata)>> = seq.into_stream().try_collect().await;

    match result {
        Err(Error::ServerMessage(msg)) => assert_eq!(msg, "boom"),
        other => panic!("Expected ServerMessage, got {other:?}"),
    }
}

#[test]
fn test_sequence_is_send() {
    fn assert_send<T: Send>(_: &T) {}
    let transport: Arc<ScriptedTransport> = ScriptedTransport::new().into_arc();
    let mut seq = PaginatedSequence::<String>::new(base_url(), AuthConfig::None, transport);
    assert_send(&seq.next());
}

//! HTTP transport against a mock server

use reqwest::Client;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ycrawler::config::FetchConfig;
use ycrawler::crawler::{fetch_batch, HttpTransport, Transport};
use ycrawler::TransportError;

fn transport() -> HttpTransport {
    HttpTransport::from_config(&FetchConfig::default()).expect("Failed to build transport")
}

#[tokio::test]
async fn test_get_returns_raw_bytes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 159, 146, 150]))
        .mount(&mock_server)
        .await;

    let body = transport()
        .get(&format!("{}/page", mock_server.uri()))
        .await
        .expect("fetch failed");

    assert_eq!(&body[..], &[0u8, 159, 146, 150]);
}

#[tokio::test]
async fn test_non_authoritative_counts_as_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(203).set_body_string("proxied"))
        .mount(&mock_server)
        .await;

    let body = transport().get(&mock_server.uri()).await.expect("fetch failed");
    assert_eq!(&body[..], b"proxied");
}

#[tokio::test]
async fn test_error_status_carries_status_and_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let error = transport()
        .get(&format!("{}/missing", mock_server.uri()))
        .await
        .expect_err("404 must fail");

    assert_eq!(error.status(), Some(404));
    match error {
        TransportError::Status { body, url, .. } => {
            assert_eq!(&body[..], b"not here");
            assert!(url.ends_with("/missing"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_no_content_is_not_a_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let error = transport().get(&mock_server.uri()).await.expect_err("204 must fail");
    assert_eq!(error.status(), Some(204));
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("Failed to build client");

    let error = HttpTransport::new(client)
        .get(&mock_server.uri())
        .await
        .expect_err("request must time out");

    assert!(matches!(error, TransportError::Timeout { .. }));
}

#[tokio::test]
async fn test_unparseable_url_is_a_captured_failure() {
    let error = transport().get("item?id=1").await.expect_err("relative URL");
    assert!(matches!(error, TransportError::Http { .. }));
    assert_eq!(error.url(), "item?id=1");
}

#[tokio::test]
async fn test_batch_of_three_with_middle_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("zero"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("two"))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..3).map(|n| format!("{}/{}", mock_server.uri(), n)).collect();
    let outcomes = fetch_batch(&transport(), &urls).await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(&outcomes[0].as_ref().expect("position 0")[..], b"zero");
    assert_eq!(outcomes[1].as_ref().expect_err("position 1").status(), Some(500));
    assert_eq!(&outcomes[2].as_ref().expect("position 2")[..], b"two");
}

//! HTTP-level tests for the update-value source
//!
//! Uses wiremock so no external lookup service is contacted.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tophost_core::Error;
use tophost_core::traits::UpdateValueSource;
use tophost_value_http::HttpValueSource;

#[tokio::test]
async fn body_is_returned_verbatim() {
    let server = MockServer::start().await;

    // Trailing newline must survive: the body is the value, untouched
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.7\n"))
        .mount(&server)
        .await;

    let source = HttpValueSource::new(format!("{}/ip", server.uri()), "tophost-ddns").unwrap();
    let value = source.fetch().await.unwrap();

    assert_eq!(value, "203.0.113.7\n");
}

#[tokio::test]
async fn non_success_status_is_a_fetch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = HttpValueSource::new(format!("{}/ip", server.uri()), "tophost-ddns").unwrap();
    let result = source.fetch().await;

    assert!(matches!(result, Err(Error::FetchFailed(_))));
}

#[tokio::test]
async fn configured_user_agent_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip"))
        .and(header("user-agent", "custom-agent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.7"))
        .mount(&server)
        .await;

    let source = HttpValueSource::new(format!("{}/ip", server.uri()), "custom-agent/1.0").unwrap();
    let value = source.fetch().await.unwrap();

    assert_eq!(value, "203.0.113.7");
}

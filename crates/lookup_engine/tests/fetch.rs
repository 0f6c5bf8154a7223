use std::time::Duration;

use lookup_engine::{FailureKind, FetchSettings, ReqwestSource, SearchSource};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer, route: &str) -> ReqwestSource {
    ReqwestSource::new(FetchSettings {
        base_url: format!("{}{}", server.uri(), route),
        ..FetchSettings::default()
    })
    .expect("valid settings")
}

#[tokio::test]
async fn returns_records_for_json_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("q", "react"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "React Docs"},
            {"id": 2, "title": "Vue Guide"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records = source_for(&server, "/posts")
        .search("react")
        .await
        .expect("search ok");

    // The source does not filter; that is the pipeline's job.
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get_str("title"), Some("React Docs"));
    assert_eq!(records[1].id(), Some(&json!(2)));
}

#[tokio::test]
async fn server_error_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = source_for(&server, "/posts").search("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "HTTP 500: Internal Server Error");
    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
}

#[tokio::test]
async fn not_found_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = source_for(&server, "/missing").search("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, "HTTP 404: Not Found");
}

#[tokio::test]
async fn non_array_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    let err = source_for(&server, "/posts").search("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidBody);
}

#[tokio::test]
async fn times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let source = ReqwestSource::new(FetchSettings {
        base_url: format!("{}/slow", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    })
    .unwrap();

    let err = source.search("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1,2,3,4,5]"))
        .mount(&server)
        .await;

    let source = ReqwestSource::new(FetchSettings {
        base_url: format!("{}/large", server.uri()),
        max_bytes: 10,
        ..FetchSettings::default()
    })
    .unwrap();

    let err = source.search("x").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

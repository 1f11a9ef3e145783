use kokkai_api::{Client, Endpoint, Error, WireParams, MAX_DETAIL_CHARS};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn params() -> WireParams {
    let mut params = WireParams::new();
    params.insert("any".to_string(), json!("教育"));
    params.insert("maximumRecords".to_string(), json!(2));
    params
}

#[tokio::test]
async fn fetch_success_returns_body_as_is() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("speech.json");

    Mock::given(method("GET"))
        .and(path("/api/speech"))
        .and(query_param("any", "教育"))
        .and(query_param("maximumRecords", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&format!("{}/api", mock_server.uri())).unwrap();
    let url = client.endpoint_url(Endpoint::Speech);
    let data = client.fetch(&url, &params()).await.unwrap();

    assert_eq!(data, serde_json::from_str::<serde_json::Value>(&body).unwrap());
    assert_eq!(data["nextRecordPosition"], 3);
}

#[tokio::test]
async fn fetch_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "diet-research-bot/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("meeting.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_options(
        &mock_server.uri(),
        "diet-research-bot/2.0",
        std::time::Duration::from_secs(5),
    )
    .unwrap();
    let result = client
        .fetch(&client.endpoint_url(Endpoint::Meeting), &params())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn fetch_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/meeting_list"))
        .respond_with(ResponseTemplate::new(429).set_body_string("too many requests"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .fetch(&client.endpoint_url(Endpoint::MeetingList), &params())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RateLimited { .. }));
    assert!(err.is_api_error());
    assert_eq!(err.details(), ["too many requests".to_string()]);
    assert!(err.to_string().starts_with("HTTP 429"));
}

#[tokio::test]
async fn fetch_server_error_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let url = client.endpoint_url(Endpoint::Speech);
    let err = client.fetch(&url, &params()).await.unwrap_err();

    assert!(matches!(err, Error::Api { .. }));
    assert!(!matches!(err, Error::RateLimited { .. }));
    assert_eq!(
        err.to_string(),
        format!("HTTP 500 for {} (details: Internal Server Error)", url)
    );
}

#[tokio::test]
async fn fetch_error_body_is_truncated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("障害".repeat(600)))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .fetch(&client.endpoint_url(Endpoint::Speech), &params())
        .await
        .unwrap_err();

    assert_eq!(err.details().len(), 1);
    assert_eq!(err.details()[0].chars().count(), MAX_DETAIL_CHARS);
}

#[tokio::test]
async fn fetch_empty_error_body_has_no_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .fetch(&client.endpoint_url(Endpoint::Speech), &params())
        .await
        .unwrap_err();

    assert!(err.details().is_empty());
    assert!(err.to_string().starts_with("HTTP 404"));
}

#[tokio::test]
async fn fetch_malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .fetch(&client.endpoint_url(Endpoint::Speech), &params())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(err.is_request_error());
    assert!(!err.is_api_error());
}

#[tokio::test]
async fn fetch_message_without_count_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("error_message.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .fetch(&client.endpoint_url(Endpoint::MeetingList), &params())
        .await
        .unwrap_err();

    match err {
        Error::Api { message, details } => {
            assert_eq!(message, "検索条件を指定してください。");
            assert_eq!(details, vec!["maximumRecordsの値が範囲外です。".to_string()]);
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_connection_failure_is_request_error() {
    // nothing listens on port 1
    let client = Client::with_base_url("http://127.0.0.1:1").unwrap();
    let err = client
        .fetch(&client.endpoint_url(Endpoint::Speech), &params())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Request(_)));
    assert!(err.to_string().starts_with("Request failed"));
}

#[tokio::test]
async fn fetch_invalid_url_is_request_error() {
    let client = Client::with_base_url("not a url").unwrap();
    let err = client
        .fetch(&client.endpoint_url(Endpoint::Speech), &params())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Request(_)));
}

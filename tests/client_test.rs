use api_client::mock::{Call, CallLog, MockHandler, RecordingCache};
use api_client::{Client, ClientConfig, ClientError};
use resource_hydrator::tracing::setup_tracing;
use resource_hydrator::Transport;
use serde_json::json;
use std::sync::Arc;

const STATUS_URL: &str = "https://api.example.com/status";
const BODY: &str = r#"{"foo":"bar"}"#;

fn config() -> ClientConfig {
    ClientConfig::new("api.example.com").with_user_agent("WyriHaximus/php-api-client")
}

fn client(handler: &Arc<MockHandler>, cache: Option<&Arc<RecordingCache>>) -> Arc<Client> {
    setup_tracing();
    let mut builder = Client::builder(config()).handler(handler.clone());
    if let Some(cache) = cache {
        builder = builder.cache(cache.clone());
    }
    builder.build().expect("client builds")
}

fn send_call() -> Call {
    Call::Send("GET".into(), STATUS_URL.into())
}

#[tokio::test]
async fn request_sends_get_with_host_and_user_agent() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    handler.expect_get(STATUS_URL).return_ok(BODY);
    let client = client(&handler, None);

    let body = client.request("status", true).await.expect("request succeeds");

    assert_eq!(body, json!({"foo": "bar"}));
    let requests = handler.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, reqwest::Method::GET);
    assert_eq!(requests[0].url.as_str(), STATUS_URL);
    assert_eq!(
        requests[0].headers,
        vec![
            ("Host".to_string(), "api.example.com".to_string()),
            ("User-Agent".to_string(), "WyriHaximus/php-api-client".to_string()),
        ]
    );
    assert_eq!(requests[0].body, None);
    handler.verify();
}

#[tokio::test]
async fn refresh_skips_cache_read_but_stores_body() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    handler.expect_get(STATUS_URL).return_ok(BODY);
    let cache = RecordingCache::new(log.clone());
    cache.insert("status", r#"{"foo":"stale"}"#);
    let client = client(&handler, Some(&cache));

    let body = client.request("status", true).await.unwrap();

    assert_eq!(body, json!({"foo": "bar"}));
    assert_eq!(
        log.calls(),
        vec![send_call(), Call::CacheSet("status".into(), BODY.into())]
    );
    assert_eq!(cache.entry("status").as_deref(), Some(BODY));
    handler.verify();
}

#[tokio::test]
async fn without_cache_every_request_hits_the_network() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    handler.expect_get(STATUS_URL).return_ok(BODY);
    handler.expect_get(STATUS_URL).return_ok(BODY);
    let client = client(&handler, None);

    client.request("status", false).await.unwrap();
    client.request("status", false).await.unwrap();

    assert_eq!(log.calls(), vec![send_call(), send_call()]);
    handler.verify();
}

#[tokio::test]
async fn cache_miss_reads_sends_then_stores() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    handler.expect_get(STATUS_URL).return_ok(BODY);
    let cache = RecordingCache::new(log.clone());
    let client = client(&handler, Some(&cache));

    let body = client.request("status", false).await.unwrap();

    assert_eq!(body, json!({"foo": "bar"}));
    assert_eq!(
        log.calls(),
        vec![
            Call::CacheGet("status".into()),
            send_call(),
            Call::CacheSet("status".into(), BODY.into()),
        ]
    );
    handler.verify();
}

#[tokio::test]
async fn cache_hit_skips_the_network() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    let cache = RecordingCache::new(log.clone());
    cache.insert("status", BODY);
    let client = client(&handler, Some(&cache));

    let body = client.request("status", false).await.unwrap();

    assert_eq!(body, json!({"foo": "bar"}));
    assert_eq!(log.calls(), vec![Call::CacheGet("status".into())]);
    assert!(handler.requests().is_empty());
}

#[tokio::test]
async fn failed_cache_read_falls_back_to_network() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    handler.expect_get(STATUS_URL).return_ok(BODY);
    let cache = RecordingCache::failing_reads(log.clone());
    let client = client(&handler, Some(&cache));

    let body = client.request("status", false).await.unwrap();

    assert_eq!(body, json!({"foo": "bar"}));
    assert_eq!(log.calls().len(), 3);
    handler.verify();
}

#[tokio::test]
async fn corrupt_cached_body_is_replaced_from_the_network() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    handler.expect_get(STATUS_URL).return_ok(BODY);
    let cache = RecordingCache::new(log.clone());
    cache.insert("status", "<html>");
    let client = client(&handler, Some(&cache));

    let body = client.request("status", false).await.unwrap();

    assert_eq!(body, json!({"foo": "bar"}));
    assert_eq!(
        log.calls(),
        vec![
            Call::CacheGet("status".into()),
            send_call(),
            Call::CacheSet("status".into(), BODY.into()),
        ]
    );
    assert_eq!(cache.entry("status").as_deref(), Some(BODY));
    handler.verify();
}

#[tokio::test]
async fn api_errors_are_not_cached() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    handler.expect_get(STATUS_URL).return_err(404, "not found");
    let cache = RecordingCache::new(log.clone());
    let client = client(&handler, Some(&cache));

    let error = client.request("status", false).await.unwrap_err();

    assert!(matches!(error, ClientError::Api { status: 404, .. }));
    assert_eq!(log.calls(), vec![Call::CacheGet("status".into()), send_call()]);
    assert_eq!(cache.entry("status"), None);
    handler.verify();
}

#[tokio::test]
async fn invalid_json_is_reported_and_not_cached() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    handler.expect_get(STATUS_URL).return_ok("<html>");
    let cache = RecordingCache::new(log.clone());
    let client = client(&handler, Some(&cache));

    let error = client.request("status", false).await.unwrap_err();

    assert!(matches!(error, ClientError::Json(_)));
    assert_eq!(cache.entry("status"), None);
}

#[tokio::test]
async fn paths_resolve_under_the_base_path() {
    let log = CallLog::default();
    let handler = MockHandler::new(log.clone());
    handler
        .expect_get("https://wyrihaximus.net/api/repos/1")
        .return_ok("{}");
    handler
        .expect_get("https://wyrihaximus.net/api/repos/2")
        .return_ok("{}");
    let client = Client::builder(ClientConfig::new("wyrihaximus.net").with_path("/api/"))
        .handler(handler.clone())
        .build()
        .unwrap();

    client.request("repos/1", false).await.unwrap();
    client.request("/repos/2", false).await.unwrap();
    handler.verify();
}

#[test]
fn base_url_follows_configuration() {
    let cases = [
        (
            ClientConfig::new("api.wyrihaximus.net").with_schema("http"),
            "http://api.wyrihaximus.net/",
        ),
        (
            ClientConfig::new("wyrihaximus.net").with_path("/api/"),
            "https://wyrihaximus.net/api/",
        ),
        (
            ClientConfig::new("thorerik.com").with_schema("gopher"),
            "gopher://thorerik.com/",
        ),
    ];

    for (config, expected) in cases {
        let handler = MockHandler::new(CallLog::default());
        let client = Client::builder(config).handler(handler).build().unwrap();
        assert_eq!(client.base_url().as_str(), expected);
    }
}

#[test]
fn missing_host_fails_to_build() {
    let handler = MockHandler::new(CallLog::default());
    let error = Client::builder(ClientConfig::default())
        .handler(handler)
        .build()
        .unwrap_err();

    assert!(matches!(error, ClientError::Config(_)));
}

#[tokio::test]
async fn client_exposes_its_hydrator_through_the_transport_trait() {
    let handler = MockHandler::new(CallLog::default());
    let client = client(&handler, None);

    let hydrator = Transport::hydrator(client.as_ref());
    assert_eq!(hydrator.transport(), &client.handle());
    assert!(client.handle().is_attached());
}

mod support;

use resource_hydrator::{downcast, HydratorError, Transport, TransportHandle};
use serde_json::json;
use support::sync_api;

#[test]
fn handle_hydrate_delegates_to_the_transport_hydrator() {
    let transport = support::transport("sync");
    let repository: sync_api::Repository = transport
        .hydrator()
        .hydrate_as("Repository", support::repository_json())
        .unwrap();

    let sub = repository
        .transport
        .hydrate("SubResource", json!({"id": 7, "slug": "seven"}))
        .unwrap();
    let sub: sync_api::SubResource = downcast(sub).unwrap();

    assert_eq!(sub.id, 7);
    assert_eq!(sub.transport, transport.handle());
}

#[tokio::test]
async fn handle_request_goes_through_the_transport() {
    let transport = support::transport("sync");
    transport
        .expect_request("/repos/1")
        .return_ok(support::repository_json());

    let body = transport.handle().request("/repos/1").await.unwrap();

    assert_eq!(body, support::repository_json());
    assert_eq!(transport.requests(), vec![("/repos/1".to_owned(), false)]);
    transport.verify();
}

#[tokio::test]
async fn refresh_bypasses_the_cache_and_rehydrates() {
    let transport = support::transport("sync");
    let repository: sync_api::Repository = transport
        .hydrator()
        .hydrate_as("Repository", support::repository_json())
        .unwrap();

    let mut updated = support::repository_json();
    updated["slog"] = json!("Wyrihaximus/php-travis-client-renamed");
    transport.expect_request("/repos/1").return_ok(updated);

    let refreshed = repository
        .transport
        .refresh("/repos/1", "Repository")
        .await
        .unwrap();
    let refreshed: sync_api::Repository = downcast(refreshed).unwrap();

    assert_eq!(refreshed.slug, "Wyrihaximus/php-travis-client-renamed");
    assert_eq!(transport.requests(), vec![("/repos/1".to_owned(), true)]);
    transport.verify();
}

#[tokio::test]
async fn transport_failures_propagate() {
    let transport = support::transport("sync");
    transport.expect_request("/repos/404").return_err("not found");

    let error = transport.handle().request("/repos/404").await.unwrap_err();

    assert!(matches!(error, HydratorError::Transport(_)));
    assert_eq!(error.to_string(), "Transport error: not found");
    transport.verify();
}

#[tokio::test]
async fn dropped_transport_is_reported_not_kept_alive() {
    let transport = support::transport("sync");
    let repository: sync_api::Repository = transport
        .hydrator()
        .hydrate_as("Repository", support::repository_json())
        .unwrap();
    drop(transport);

    assert!(!repository.transport.is_attached());
    let error = repository.transport.request("/repos/1").await.unwrap_err();
    assert!(matches!(error, HydratorError::TransportGone));
    assert!(matches!(
        repository.transport.hydrate("SubResource", json!({})),
        Err(HydratorError::TransportGone)
    ));
}

#[test]
fn detached_resources_compare_equal() {
    let left = sync_api::Plain::default();
    let right = sync_api::Plain::default();

    assert_eq!(left.transport, TransportHandle::detached());
    assert_eq!(left, right);
}

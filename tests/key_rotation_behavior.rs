//! Behavior-driven tests for credential rotation.
//!
//! These tests verify HOW the fetcher walks the key pool when the upstream
//! answers with its rate-limit notice, and where it stops.
#![recursion_limit = "256"]

mod support;

use std::sync::Arc;

use serde_json::json;
use support::{
    client, config, daily_document, rate_limit_notice, KeyGatedHttpClient, ScriptedHttpClient,
};
use tickerscope_core::{
    AlphaVantageClient, HttpError, HttpResponse, QueryError, Symbol, ValidationErrorKind,
};

fn ibm() -> Symbol {
    Symbol::parse("IBM").expect("valid symbol")
}

// =============================================================================
// Rotation: Quota Ceiling
// =============================================================================

#[tokio::test]
async fn when_every_key_is_rate_limited_system_stops_after_pool_size_times_calls_per_key() {
    // Given: Three keys, five calls each, and an upstream that always says "over quota"
    let transport = ScriptedHttpClient::always(support::json_response(&rate_limit_notice()));
    let client = client(&config(3, 5), transport.clone());

    // When: A daily series is requested
    let result = client.daily(&ibm()).await;

    // Then: Exactly fifteen network calls were made before QuotaExceeded
    assert_eq!(
        result.expect_err("quota must be exhausted"),
        QueryError::QuotaExceeded {
            attempts: 16,
            ceiling: 15
        }
    );
    assert_eq!(transport.request_count(), 15, "no sixteenth network call");
    assert_eq!(client.fetcher().pool().total_attempts(), 16);
}

#[tokio::test]
async fn when_quota_is_exhausted_later_requests_fail_without_network_calls() {
    // Given: A client whose pool was exhausted by an earlier request
    let transport = ScriptedHttpClient::always(support::json_response(&rate_limit_notice()));
    let client = client(&config(2, 2), transport.clone());
    let _ = client.weekly(&ibm()).await;
    assert_eq!(transport.request_count(), 4);

    // When: Another request is made
    let result = client.search_symbols("tesco").await;

    // Then: It fails immediately and the transport is not touched
    assert!(matches!(result, Err(QueryError::QuotaExceeded { .. })));
    assert_eq!(transport.request_count(), 4);
}

#[tokio::test]
async fn when_rotating_system_cycles_keys_in_pool_order() {
    // Given: Three keys, two calls each, all rate limited
    let transport = ScriptedHttpClient::always(support::json_response(&rate_limit_notice()));
    let client = client(&config(3, 2), transport.clone());

    // When: The request runs until the ceiling
    let _ = client.monthly(&ibm()).await;

    // Then: Keys were tried in order and wrapped around
    assert_eq!(
        transport.keys_used(),
        vec!["key-1", "key-2", "key-3", "key-1", "key-2", "key-3"]
    );
}

// =============================================================================
// Rotation: Recovery
// =============================================================================

#[tokio::test]
async fn when_only_second_key_works_system_rotates_once_and_succeeds() {
    // Given: Only the second of three keys is accepted
    let transport = KeyGatedHttpClient::new(&["key-2"], daily_document());
    let client = client(&config(3, 5), transport.clone());

    // When: A daily series is requested
    let result = client.daily(&ibm()).await;

    // Then: One rotation happened and the normalized series is returned
    let normalized = result.expect("second key should succeed");
    assert_eq!(normalized.series.len(), 3);
    assert_eq!(transport.keys_used(), vec!["key-1", "key-2"]);
    assert_eq!(client.fetcher().pool().current_index(), 1);
}

#[tokio::test]
async fn when_only_third_key_works_system_rotates_twice_and_succeeds() {
    // Given: Only the third of three keys is accepted
    let transport = KeyGatedHttpClient::new(&["key-3"], daily_document());
    let client = client(&config(3, 5), transport.clone());

    // When: A daily series is requested
    let result = client.daily(&ibm()).await;

    // Then: Two rotations happened
    assert!(result.is_ok());
    assert_eq!(transport.keys_used(), vec!["key-1", "key-2", "key-3"]);
    assert_eq!(client.fetcher().pool().current_index(), 2);
}

#[tokio::test]
async fn when_a_key_recovered_next_request_starts_from_that_key() {
    // Given: A client that already rotated to the second key
    let transport = KeyGatedHttpClient::new(&["key-2"], daily_document());
    let client = client(&config(3, 5), transport.clone());
    client.daily(&ibm()).await.expect("first request");

    // When: A second request is made
    client.daily(&ibm()).await.expect("second request");

    // Then: It goes straight to the working key
    assert_eq!(transport.keys_used(), vec!["key-1", "key-2", "key-2"]);
    assert_eq!(client.fetcher().pool().total_attempts(), 3);
}

#[tokio::test]
async fn when_rate_limited_system_replays_identical_parameters() {
    // Given: The first response is the notice, the second is a real payload
    let transport =
        ScriptedHttpClient::then_json(vec![rate_limit_notice()], support::intraday_document());
    let client = client(&config(2, 5), transport.clone());

    // When: An intraday series is requested
    client
        .intraday(&ibm(), Default::default())
        .await
        .expect("second attempt succeeds");

    // Then: Both requests carry the same parameters apart from the key
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    for name in ["function", "symbol", "interval"] {
        assert_eq!(
            requests[0].query_value(name),
            requests[1].query_value(name),
            "parameter {name}"
        );
    }
    assert_eq!(requests[0].query_value("apikey"), Some("key-1"));
    assert_eq!(requests[1].query_value("apikey"), Some("key-2"));
}

// =============================================================================
// Rotation: Non-Triggers
// =============================================================================

#[tokio::test]
async fn when_transport_fails_system_propagates_without_rotating() {
    // Given: An upstream that cannot be reached
    let transport = ScriptedHttpClient::new(
        Vec::new(),
        Err(HttpError::new("connection failed: connection refused")),
    );
    let client = client(&config(3, 5), transport.clone());

    // When: A daily series is requested
    let result = client.daily(&ibm()).await;

    // Then: The transport error surfaces after a single call on the first key
    match result {
        Err(QueryError::Transport(error)) => {
            assert!(error.message().contains("connection refused"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(transport.request_count(), 1);
    assert_eq!(client.fetcher().pool().current_index(), 0);
}

#[tokio::test]
async fn when_note_text_differs_system_does_not_rotate() {
    // Given: A Note that is not the configured rate-limit notice
    let transport = ScriptedHttpClient::always(support::json_response(
        &json!({ "Note": "The API is under scheduled maintenance." }),
    ));
    let client = client(&config(3, 5), transport.clone());

    // When: A daily series is requested
    let result = client.daily(&ibm()).await;

    // Then: The body goes to the normalizer, which rejects it
    match result {
        Err(QueryError::Validation(error)) => {
            assert_eq!(error.kind(), ValidationErrorKind::MissingField);
            assert_eq!(error.path().to_string(), "Meta Data");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn when_notice_arrives_with_error_status_system_still_rotates() {
    // Given: The notice is served with a 429, then a real payload follows
    let transport = ScriptedHttpClient::new(
        vec![Ok(HttpResponse::new(429, rate_limit_notice().to_string()))],
        Ok(support::json_response(&daily_document())),
    );
    let client = client(&config(2, 5), transport.clone());

    // When: A daily series is requested
    let result = client.daily(&ibm()).await;

    // Then: The second key served the request
    assert!(result.is_ok());
    assert_eq!(transport.keys_used(), vec!["key-1", "key-2"]);
}

// =============================================================================
// Rotation: Isolation
// =============================================================================

#[tokio::test]
async fn when_two_clients_exist_system_keeps_rotation_state_separate() {
    // Given: Two clients sharing a transport where only key-2 works
    let transport = KeyGatedHttpClient::new(&["key-2"], daily_document());
    let first = client(&config(3, 5), transport.clone());
    let second = client(&config(3, 5), transport.clone());

    // When: Only the first client makes a request
    first.daily(&ibm()).await.expect("first client succeeds");

    // Then: The second client still starts at the first key
    assert_eq!(first.fetcher().pool().current_index(), 1);
    assert_eq!(second.fetcher().pool().current_index(), 0);
    assert_eq!(second.fetcher().pool().total_attempts(), 0);
}

#[tokio::test]
async fn when_requests_run_concurrently_system_counts_every_attempt() {
    // Given: One client shared by several tasks
    let transport = ScriptedHttpClient::always(support::json_response(&daily_document()));
    let client: Arc<AlphaVantageClient> = Arc::new(client(&config(2, 5), transport.clone()));

    // When: Four requests run at once
    let handles = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.daily(&ibm()).await })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle
            .await
            .expect("task completes")
            .expect("request succeeds");
    }

    // Then: The shared counter saw all four attempts
    assert_eq!(client.fetcher().pool().total_attempts(), 4);
    assert_eq!(transport.request_count(), 4);
}

//! Integration tests for `POST /api/search`.
//!
//! The search server runs with real registrar and Claude clients pointed at
//! an in-process fake upstream.

use axum::http::StatusCode;
use serde_json::json;

use domain_search_core::PRIORITY_TLDS;
use domain_search_integration_tests::{
    REGISTRAR_TOKEN, SUPPORTED_TLDS, TestServer, UpstreamOptions,
};

fn with_label(reply: &str) -> UpstreamOptions {
    UpstreamOptions {
        label_reply: Some(reply.to_string()),
        ..UpstreamOptions::default()
    }
}

fn domains(body: &serde_json::Value) -> Vec<String> {
    body["domains"]
        .as_array()
        .expect("domains array")
        .iter()
        .map(|d| d["domain"].as_str().expect("domain string").to_string())
        .collect()
}

// =============================================================================
// Query Modes
// =============================================================================

#[tokio::test]
async fn test_full_domain_checks_exactly_one_candidate() {
    let server = TestServer::start(with_label("unused")).await;

    let (status, body) = server.post_search(json!({ "q": "example.com" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(domains(&body), ["example.com"]);
    assert_eq!(server.upstream.last_domains(), ["example.com"]);
    assert_eq!(server.upstream.tld_calls(), 0);
    assert_eq!(server.upstream.generation_calls(), 0);
}

#[tokio::test]
async fn test_single_word_fans_out_over_normalized_tlds() {
    let server = TestServer::start(with_label("unused")).await;

    let (status, body) = server.post_search(json!({ "q": "  Cats " })).await;
    assert_eq!(status, StatusCode::OK);

    let checked = server.upstream.last_domains();
    // ".shop" and "COM" normalize into the list once each
    assert_eq!(checked.len(), SUPPORTED_TLDS.len() - 1);
    for (domain, tld) in checked.iter().zip(PRIORITY_TLDS) {
        assert_eq!(domain, &format!("cats.{tld}"));
    }
    assert!(checked.contains(&"cats.shop".to_string()));
    assert_eq!(domains(&body), checked);
    assert_eq!(server.upstream.generation_calls(), 0);
}

#[tokio::test]
async fn test_multi_word_uses_generated_label() {
    let server = TestServer::start(with_label("My Cool Idea!!")).await;

    let (status, _) = server.post_search(json!({ "q": "my cool idea" })).await;
    assert_eq!(status, StatusCode::OK);

    let checked = server.upstream.last_domains();
    assert_eq!(checked.len(), 25);
    for (domain, tld) in checked.iter().zip(PRIORITY_TLDS) {
        assert_eq!(domain, &format!("mycoolidea.{tld}"));
    }
    assert_eq!(server.upstream.generation_calls(), 1);
}

#[tokio::test]
async fn test_generation_failure_falls_back_to_compacted_query() {
    let server = TestServer::start(UpstreamOptions::default()).await;

    let (status, _) = server.post_search(json!({ "q": "sunny side up" })).await;
    assert_eq!(status, StatusCode::OK);

    let checked = server.upstream.last_domains();
    assert_eq!(checked.first().map(String::as_str), Some("sunnysideup.com"));
    assert_eq!(server.upstream.generation_calls(), 1);
}

// =============================================================================
// Caching
// =============================================================================

#[tokio::test]
async fn test_repeated_multi_word_query_generates_once() {
    let server = TestServer::start(with_label("snackstack")).await;

    for _ in 0..3 {
        let (status, _) = server.post_search(json!({ "q": "snack stack" })).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(server.upstream.generation_calls(), 1);
    assert_eq!(server.upstream.tld_calls(), 1);
    assert_eq!(server.upstream.availability_calls(), 3);
}

// =============================================================================
// Request Shape
// =============================================================================

#[tokio::test]
async fn test_blank_query_returns_empty_without_upstream_calls() {
    let server = TestServer::start(with_label("unused")).await;

    for body in [json!({ "q": "   " }), json!({ "q": "" }), json!({})] {
        let (status, response) = server.post_search(body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({ "domains": [] }));
    }

    assert_eq!(server.upstream.tld_calls(), 0);
    assert_eq!(server.upstream.availability_calls(), 0);
}

#[tokio::test]
async fn test_team_and_token_reach_the_registrar() {
    let server = TestServer::start(with_label("unused")).await;

    server
        .post_search(json!({ "q": "example.com", "teamId": "team_abc" }))
        .await;

    assert_eq!(server.upstream.last_team().as_deref(), Some("team_abc"));
    assert_eq!(
        server.upstream.last_auth(),
        Some(format!("Bearer {REGISTRAR_TOKEN}"))
    );
}

#[tokio::test]
async fn test_provider_entries_are_returned_unmodified() {
    let server = TestServer::start(with_label("unused")).await;

    let (_, body) = server.post_search(json!({ "q": "example.com" })).await;

    assert_eq!(
        body,
        json!({ "domains": [{ "domain": "example.com", "available": true }] })
    );
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_upstream_failure_is_a_5xx_with_error_message() {
    let server = TestServer::start(UpstreamOptions {
        fail_availability: true,
        ..UpstreamOptions::default()
    })
    .await;

    let (status, body) = server.post_search(json!({ "q": "example.com" })).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = body["error"].as_str().expect("error message");
    assert!(!message.is_empty());
    assert!(!message.contains("exploded"));
    assert!(body.get("domains").is_none());
}

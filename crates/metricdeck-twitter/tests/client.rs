//! Integration tests for `TwitterClient` using wiremock HTTP mocks.

use metricdeck_twitter::{TwitterClient, TwitterError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TwitterClient {
    TwitterClient::with_base_url(30, base_url).expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_authed_user_parses_metrics() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": {
            "id": "42",
            "username": "acme",
            "public_metrics": { "followers_count": 1200, "views": 100, "likes": 5 }
        }
    });

    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .and(query_param("user.fields", "public_metrics"))
        .and(header("authorization", "Bearer tok-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let user = client
        .fetch_authed_user("tok-xyz")
        .await
        .expect("should parse user");

    assert_eq!(user.id, "42");
    assert_eq!(user.username.as_deref(), Some("acme"));
    assert_eq!(user.public_metrics.get("followers_count"), Some(&1200));
    assert_eq!(user.public_metrics.get("views"), Some(&100));
}

#[tokio::test]
async fn fetch_recent_tweets_caps_at_ten_and_preserves_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            { "id": "t2", "text": "newer", "created_at": "2026-08-02T10:00:00Z", "like_count": 4 },
            { "id": "t1", "text": "older", "created_at": "2026-08-01T10:00:00Z" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/2/users/42/tweets"))
        .and(query_param("max_results", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tweets = client
        .fetch_recent_tweets("tok-xyz", "42")
        .await
        .expect("should parse tweets");

    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0].id, "t2");
    assert_eq!(tweets[0].like_count, 4);
    assert_eq!(tweets[1].id, "t1");
    assert_eq!(tweets[1].like_count, 0, "missing counter defaults to zero");
}

#[tokio::test]
async fn empty_timeline_yields_empty_vec() {
    let server = MockServer::start().await;

    // The platform omits "data" entirely for accounts with no tweets.
    Mock::given(method("GET"))
        .and(path("/2/users/42/tweets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "meta": {} })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tweets = client
        .fetch_recent_tweets("tok-xyz", "42")
        .await
        .expect("should parse empty timeline");

    assert!(tweets.is_empty());
}

#[tokio::test]
async fn in_body_platform_error_surfaces_message_and_code() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": { "message": "Invalid token", "code": 190 }
    });

    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_authed_user("tok-bad").await.unwrap_err();

    match err {
        TwitterError::Api { message, code } => {
            assert_eq!(message, "Invalid token");
            assert_eq!(code, Some(190));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn platform_error_wins_over_http_status() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "errors": [{ "message": "Unauthorized", "code": 32 }]
    });

    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_authed_user("tok-bad").await.unwrap_err();

    assert!(
        matches!(err, TwitterError::Api { ref message, .. } if message == "Unauthorized"),
        "expected platform message, got: {err:?}"
    );
}

#[tokio::test]
async fn non_2xx_without_error_body_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_authed_user("tok-xyz").await.unwrap_err();

    assert!(matches!(err, TwitterError::Http(_)), "got: {err:?}");
}

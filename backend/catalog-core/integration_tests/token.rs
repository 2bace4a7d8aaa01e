use crate::helpers::{TOKEN_PATH, mount_token, token_manager};

use catalog_core::error::TokenError;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies that a cached token is reused within its lifetime.
///
/// **WHY THIS MATTERS**: Twitch rate-limits the token endpoint. Exchanging per request
/// would add a round trip to every search and eventually get the app throttled.
///
/// **BUG THIS CATCHES**: Would catch the cache never being written or always considered stale.
#[tokio::test]
async fn given_fresh_token_when_requested_twice_then_one_exchange() {
    // GIVEN: A token endpoint that must be hit exactly once
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    let tokens = token_manager(&server);

    // WHEN: Asking twice
    let first = tokens.get_valid_token().await.unwrap();
    let second = tokens.get_valid_token().await.unwrap();

    // THEN: Same token, one exchange (verified when the server drops)
    assert_eq!(first.value(), "test-access-token");
    assert_eq!(first.value(), second.value());
}

/// **VALUE**: Verifies that a token inside the safety margin is refreshed.
///
/// **WHY THIS MATTERS**: This is the simulated-expiry path. A 30s token is already
/// inside the 60s margin, so every call must exchange again.
///
/// **BUG THIS CATCHES**: Would catch the margin being ignored.
#[tokio::test]
async fn given_token_inside_margin_when_requested_twice_then_two_exchanges() {
    // GIVEN: Tokens that expire in 30s
    let server = MockServer::start().await;
    mount_token(&server, 30, 2).await;
    let tokens = token_manager(&server);

    // WHEN: Asking twice
    tokens.get_valid_token().await.unwrap();
    tokens.get_valid_token().await.unwrap();

    // THEN: Two exchanges (verified on drop)
}

/// **VALUE**: Verifies that invalidation forces exactly one fresh exchange.
#[tokio::test]
async fn given_invalidated_cache_when_requested_then_exchanges_again() {
    // GIVEN: A cached token
    let server = MockServer::start().await;
    mount_token(&server, 3600, 2).await;
    let tokens = token_manager(&server);
    tokens.get_valid_token().await.unwrap();

    // WHEN: Invalidating, then asking twice
    tokens.invalidate().await;
    tokens.get_valid_token().await.unwrap();
    tokens.get_valid_token().await.unwrap();

    // THEN: One exchange before, one after (verified on drop)
}

/// **VALUE**: Verifies a rejected exchange fails with the status and leaves no token.
///
/// **WHY THIS MATTERS**: Wrong credentials must surface as an auth error, not as a
/// half-initialized token that IGDB then rejects.
#[tokio::test]
async fn given_rejected_credentials_when_requested_then_exchange_error_and_empty_cache() {
    // GIVEN: Twitch answers 400 once (invalid client secret), then recovers
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"status": 400, "message": "invalid client secret"})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_token(&server, 3600, 1).await;
    let tokens = token_manager(&server);

    // WHEN: Requesting
    let err = tokens.get_valid_token().await.unwrap_err();

    // THEN: Exchange error with status
    assert!(matches!(err, TokenError::Exchange { .. }));
    assert_eq!(err.status_code(), Some(400));

    // AND: Nothing was cached, so the next call exchanges again and succeeds
    let token = tokens.get_valid_token().await.unwrap();
    assert_eq!(token.value(), "test-access-token");
}

/// **VALUE**: Verifies an out-of-range lifetime is a decode error, not a panic.
///
/// **WHY THIS MATTERS**: The lifetime comes from an upstream body. A panic here would kill
/// the request task and the client would get no JSON error at all.
///
/// **BUG THIS CATCHES**: Would catch `Instant + Duration` overflowing on a huge `expires_in`.
#[tokio::test]
async fn given_huge_expires_in_when_requested_then_decode_error() {
    // GIVEN: Twitch reports a lifetime of u64::MAX seconds
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "x",
            "expires_in": u64::MAX,
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let tokens = token_manager(&server);

    // WHEN: Requesting
    let err = tokens.get_valid_token().await.unwrap_err();

    // THEN: Decode error
    assert!(matches!(err, TokenError::Decode { .. }));
    assert!(err.to_string().contains("expires_in out of range"));
}

/// **VALUE**: Verifies a malformed token body is a decode error.
#[tokio::test]
async fn given_malformed_token_body_when_requested_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "nope"})))
        .mount(&server)
        .await;
    let tokens = token_manager(&server);

    let err = tokens.get_valid_token().await.unwrap_err();

    assert!(matches!(err, TokenError::Decode { .. }));
}

/// **VALUE**: Verifies that concurrent refreshes both succeed.
///
/// **WHY THIS MATTERS**: Two requests arriving with a cold cache race to refresh. Either
/// token is fine; neither request may fail.
#[tokio::test]
async fn given_cold_cache_when_requested_concurrently_then_both_get_a_token() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1..=2).await;
    let tokens = token_manager(&server);

    let (a, b) = tokio::join!(tokens.get_valid_token(), tokens.get_valid_token());

    assert!(a.is_ok());
    assert!(b.is_ok());

    // AND: The winner is cached; a third call stays within the exchange budget
    assert!(tokens.get_valid_token().await.is_ok());
}

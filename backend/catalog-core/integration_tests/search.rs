use crate::helpers::{GAMES_PATH, TEST_ACCESS_TOKEN, TEST_CLIENT_ID, TEST_TIMEOUT, mount_token, search_proxy};

use catalog_core::error::CatalogError;
use catalog_core::search::SEARCH_RESULT_LIMIT;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn zelda_records() -> Value {
    json!([
        {
            "id": 1025,
            "name": "The Legend of Zelda: Breath of the Wild",
            "first_release_date": 1488499200,
            "category": 0,
            "platforms": [{"id": 130, "name": "Nintendo Switch"}, {"id": 41, "name": "Wii U"}]
        },
        {
            "id": 119388,
            "name": "The Legend of Zelda: Breath of the Wild - Nintendo Switch Edition",
            "category": 0,
            "parent_game": 1025,
            "platforms": null
        },
        {
            "id": 7346,
            "name": "The Legend of Zelda: Collector's Edition",
            "first_release_date": 1068249600,
            "category": 3
        }
    ])
}

fn numbered_records(count: u64) -> Value {
    Value::Array(
        (1..=count)
            .map(|id| json!({"id": id, "name": format!("Game {id}"), "category": 0}))
            .collect(),
    )
}

/// **VALUE**: Verifies the full search path: token, headers, query body, normalization.
///
/// **WHY THIS MATTERS**: This is the request the browser makes on every keystroke-debounced
/// search. Every field in the reply feeds the result list.
///
/// **BUG THIS CATCHES**: Would catch missing auth headers, a dropped exclusion filter,
/// or a broken category/year mapping.
#[tokio::test]
async fn given_zelda_records_when_searching_then_results_are_normalized() {
    // GIVEN: A token and an IGDB endpoint that only answers correctly-formed requests
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .and(header("Client-ID", TEST_CLIENT_ID))
        .and(header("Authorization", format!("Bearer {TEST_ACCESS_TOKEN}").as_str()))
        .and(body_string_contains("search \"zelda\";"))
        .and(body_string_contains("where category != (1,2,6,7);"))
        .and(body_string_contains("limit 35;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zelda_records()))
        .expect(1)
        .mount(&server)
        .await;
    let proxy = search_proxy(&server, TEST_TIMEOUT);

    // WHEN: Searching (surrounding whitespace is ignored)
    let results = proxy.search("  zelda ").await.unwrap();

    // THEN: Three normalized items in upstream order
    assert_eq!(results.len(), 3);

    assert_eq!(results[0].id, 1025);
    assert_eq!(results[0].year, "2017");
    assert_eq!(results[0].kind, "Main Game");
    assert_eq!(results[0].platforms, vec!["Nintendo Switch", "Wii U"]);

    assert_eq!(results[1].year, "N/A");
    assert_eq!(results[1].kind, "Version/Port");
    assert!(results[1].platforms.is_empty());

    assert_eq!(results[2].year, "2003");
    assert_eq!(results[2].kind, "Bundle");
}

/// **VALUE**: Verifies results are capped even if IGDB ignores the limit clause.
#[tokio::test]
async fn given_more_records_than_limit_when_searching_then_capped() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(numbered_records(50)))
        .mount(&server)
        .await;
    let proxy = search_proxy(&server, TEST_TIMEOUT);

    let results = proxy.search("game").await.unwrap();

    assert_eq!(results.len(), SEARCH_RESULT_LIMIT);
    assert_eq!(results[0].id, 1);
    assert_eq!(results[34].id, 35);
}

/// **VALUE**: Verifies an empty upstream array becomes a not-found error.
#[tokio::test]
async fn given_no_records_when_searching_then_not_found() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let proxy = search_proxy(&server, TEST_TIMEOUT);

    let err = proxy.search("zzzxqqq").await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { .. }));
    assert_eq!(err.http_status(), 404);
}

/// **VALUE**: Verifies a blank query is rejected before any upstream call.
///
/// **BUG THIS CATCHES**: Would catch spending a token exchange on a request that can never succeed.
#[tokio::test]
async fn given_blank_query_when_searching_then_validation_error_without_upstream_call() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 0).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let proxy = search_proxy(&server, TEST_TIMEOUT);

    let err = proxy.search("   ").await.unwrap_err();

    assert!(matches!(err, CatalogError::Validation { .. }));
    assert_eq!(err.http_status(), 400);
}

/// **VALUE**: Verifies a 401 from IGDB clears the token so the next search re-authenticates.
///
/// **WHY THIS MATTERS**: Twitch can revoke a token before its stated expiry. Without
/// invalidation the proxy would keep sending the dead token until it aged out.
///
/// **BUG THIS CATCHES**: Would catch the cache surviving an auth rejection.
#[tokio::test]
async fn given_rejected_token_when_searching_then_auth_error_and_next_search_reauthenticates() {
    // GIVEN: IGDB rejects the first call only; token endpoint must be hit twice
    let server = MockServer::start().await;
    mount_token(&server, 3600, 2).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(zelda_records()))
        .expect(1)
        .mount(&server)
        .await;
    let proxy = search_proxy(&server, TEST_TIMEOUT);

    // WHEN: First search is rejected
    let err = proxy.search("zelda").await.unwrap_err();

    // THEN: Auth error, cache cleared
    assert!(matches!(err, CatalogError::Auth { .. }));
    assert_eq!(err.http_status(), 503);

    // WHEN: Searching again
    let results = proxy.search("zelda").await.unwrap();

    // THEN: Fresh token was fetched and the search succeeds
    assert_eq!(results.len(), 3);
}

/// **VALUE**: Verifies a failed token exchange surfaces as an auth error and skips IGDB.
#[tokio::test]
async fn given_failed_token_exchange_when_searching_then_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(403).set_body_string("invalid client"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let proxy = search_proxy(&server, TEST_TIMEOUT);

    let err = proxy.search("zelda").await.unwrap_err();

    assert!(matches!(err, CatalogError::Auth { .. }));
    assert_eq!(err.http_status(), 503);
    assert_eq!(err.client_message(), "Authentication with IGDB failed");
}

/// **VALUE**: Verifies other upstream failures map to a generic 500.
#[tokio::test]
async fn given_upstream_server_error_when_searching_then_upstream_error() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let proxy = search_proxy(&server, TEST_TIMEOUT);

    let err = proxy.search("zelda").await.unwrap_err();

    assert!(matches!(err, CatalogError::Upstream { .. }));
    assert_eq!(err.upstream_status(), Some(500));
    assert_eq!(err.http_status(), 500);
    assert_eq!(err.client_message(), "Failed to fetch data from IGDB");
}

/// **VALUE**: Verifies a slow IGDB reply is cut off and reported as a timeout.
///
/// **WHY THIS MATTERS**: The browser shows a distinct message for 504. A hang would
/// leave the search spinner running forever.
#[tokio::test]
async fn given_slow_upstream_when_searching_then_timeout_error() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(zelda_records())
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;
    let proxy = search_proxy(&server, Duration::from_millis(200));

    let err = proxy.search("zelda").await.unwrap_err();

    assert!(matches!(err, CatalogError::Timeout { .. }));
    assert_eq!(err.http_status(), 504);
}

/// **VALUE**: Verifies a non-array body is an internal decode failure, not a panic.
#[tokio::test]
async fn given_malformed_body_when_searching_then_error_status_500() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "not an array"})))
        .mount(&server)
        .await;
    let proxy = search_proxy(&server, TEST_TIMEOUT);

    let err = proxy.search("zelda").await.unwrap_err();

    assert_eq!(err.http_status(), 500);
}

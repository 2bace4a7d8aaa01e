use crate::helpers::{FixedStoreChecker, GAMES_PATH, config_for, mount_token, start, start_against};

use igdb_proxy::state::AppState;

use catalog_core::details::DetailsProxy;
use catalog_core::igdb::IgdbClient;
use catalog_core::search::SearchProxy;
use catalog_core::store::StoreLookupResult;
use catalog_core::token::TokenManager;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// End-to-end tests for the HTTP surface
// The real router and state, with IGDB/Twitch/GOG mocked by wiremock
// ============================================================================

/// **VALUE**: Verifies a search request flows through router, proxy and normalization.
///
/// **WHY THIS MATTERS**: This is the browser's primary call. Query parameter naming,
/// JSON field naming (`type`, not `kind`) and status all meet here.
///
/// **BUG THIS CATCHES**: Would catch a route path typo, a serde rename regression or
/// the handler reading the wrong parameter.
#[tokio::test]
async fn given_matching_games_when_searching_then_200_with_normalized_items() {
    // GIVEN: Mocked token + IGDB, proxy running
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1025, "name": "Breath of the Wild", "first_release_date": 1488499200,
             "category": 0, "platforms": [{"name": "Nintendo Switch"}]}
        ])))
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    // WHEN: Searching
    let response = reqwest::get(server.url("/search?gameName=zelda")).await.unwrap();

    // THEN: 200 with the normalized shape
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([{
            "id": 1025,
            "name": "Breath of the Wild",
            "year": "2017",
            "type": "Main Game",
            "platforms": ["Nintendo Switch"]
        }])
    );

    server.stop().await;
}

/// **VALUE**: Verifies a missing or blank name is a JSON 400.
#[tokio::test]
async fn given_missing_game_name_when_searching_then_400_with_error_body() {
    let upstream = MockServer::start().await;
    let server = start_against(&upstream).await;

    for path_and_query in ["/search", "/search?gameName=", "/search?gameName=%20%20"] {
        let response = reqwest::get(server.url(path_and_query)).await.unwrap();

        assert_eq!(response.status().as_u16(), 400, "{path_and_query}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Game name is required");
    }

    server.stop().await;
}

/// **VALUE**: Verifies an empty IGDB result is a JSON 404.
#[tokio::test]
async fn given_no_matches_when_searching_then_404() {
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    let response = reqwest::get(server.url("/search?gameName=zzzxqqq")).await.unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    server.stop().await;
}

/// **VALUE**: Verifies a credential failure is reported as 503.
///
/// **WHY THIS MATTERS**: 503 tells the browser the proxy is misconfigured or Twitch is
/// down, which is different from "your search failed".
#[tokio::test]
async fn given_rejected_credentials_when_searching_then_503() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid client"))
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    let response = reqwest::get(server.url("/search?gameName=zelda")).await.unwrap();

    assert_eq!(response.status().as_u16(), 503);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Authentication with IGDB failed");

    server.stop().await;
}

/// **VALUE**: Verifies the details route returns camelCase fields with rewritten cover.
#[tokio::test]
async fn given_known_id_when_fetching_details_then_200_with_details() {
    // GIVEN: IGDB returns one game
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1942,
            "name": "The Witcher 3: Wild Hunt",
            "cover": {"url": "//images.igdb.com/igdb/image/upload/t_thumb/co1wyy.jpg"},
            "first_release_date": 1431993600,
            "involved_companies": [{"developer": true, "company": {"name": "CD Projekt RED"}}],
            "websites": [{"category": 13, "url": "https://store.steampowered.com/app/292030"}]
        }])))
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    // WHEN: Fetching details
    let response = reqwest::get(server.url("/details/1942")).await.unwrap();

    // THEN: 200 with camelCase fields
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "The Witcher 3: Wild Hunt");
    assert_eq!(
        body["thumbnailUrl"],
        "https://images.igdb.com/igdb/image/upload/t_cover_big/co1wyy.jpg"
    );
    assert_eq!(body["releaseDate"], "May 19, 2015");
    assert_eq!(body["developer"], "CD Projekt RED");
    assert_eq!(
        body["storeLinks"],
        json!([{"name": "Steam", "url": "https://store.steampowered.com/app/292030"}])
    );

    server.stop().await;
}

/// **VALUE**: Verifies malformed ids are rejected before any upstream call.
#[tokio::test]
async fn given_invalid_id_when_fetching_details_then_400() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    for id in ["abc", "0", "-5", "1.5"] {
        let response = reqwest::get(server.url(&format!("/details/{id}"))).await.unwrap();

        assert_eq!(response.status().as_u16(), 400, "id {id}");
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("Invalid game id"));
    }

    server.stop().await;
}

/// **VALUE**: Verifies an unknown id is a JSON 404.
#[tokio::test]
async fn given_unknown_id_when_fetching_details_then_404() {
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    let response = reqwest::get(server.url("/details/999999999")).await.unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Game not found: 999999999");

    server.stop().await;
}

/// **VALUE**: Verifies the GOG route reports a match with its URL.
#[tokio::test]
async fn given_gog_match_when_checking_then_found_with_url() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/games/ajax/filtered"))
        .and(query_param("search", "Cyberpunk 2077"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"title": "Cyberpunk 2077", "url": "/game/cyberpunk_2077"}]
        })))
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    let response = reqwest::get(server.url("/checkGog?gameName=Cyberpunk%202077")).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"found": true, "url": "https://www.gog.com/game/cyberpunk_2077"})
    );

    server.stop().await;
}

/// **VALUE**: Verifies a GOG outage still answers 200 `{found:false}` with no url key.
///
/// **BUG THIS CATCHES**: Would catch the store error escaping as a 500, or `url: null`
/// being serialized.
#[tokio::test]
async fn given_gog_outage_when_checking_then_200_not_found() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/games/ajax/filtered"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    let response = reqwest::get(server.url("/checkGog?gameName=Cyberpunk%202077")).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"found": false}));

    server.stop().await;
}

/// **VALUE**: Verifies handlers go through the `StoreChecker` trait object.
///
/// **WHY THIS MATTERS**: Other storefronts plug in at this seam. The handler must not
/// depend on the GOG implementation.
#[tokio::test]
async fn given_custom_store_checker_when_checking_then_its_answer_is_returned() {
    // GIVEN: State built by hand with a fixed checker
    let upstream = MockServer::start().await;
    let config = config_for(&upstream);
    let tokens = Arc::new(TokenManager::new(
        reqwest::Client::new(),
        config.endpoints.twitch_token.clone(),
        config.credentials.clone(),
        config.timeouts.token,
    ));
    let igdb = IgdbClient::new(reqwest::Client::new(), config.endpoints.igdb_api.clone(), tokens);
    let state = AppState::new(
        SearchProxy::new(igdb.clone(), config.timeouts.search),
        DetailsProxy::new(igdb, config.timeouts.details),
        Arc::new(FixedStoreChecker(StoreLookupResult::found("https://example.test/game"))),
    );
    let server = start(state).await;

    // WHEN: Checking
    let response = reqwest::get(server.url("/checkGog?gameName=anything")).await.unwrap();

    // THEN: The fixed answer
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"found": true, "url": "https://example.test/game"}));

    server.stop().await;
}

/// **VALUE**: Verifies a repeated `gameName` on `/search` is a JSON 400, not axum's plain text.
///
/// **WHY THIS MATTERS**: The browser parses every error body as `{error}`. A plain-text
/// rejection from the extractor breaks that contract.
///
/// **BUG THIS CATCHES**: Would catch the query extractor rejecting before the handler runs.
#[tokio::test]
async fn given_repeated_game_name_when_searching_then_400_with_error_body() {
    // GIVEN: A proxy whose IGDB must never be called
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    // WHEN: Searching with the key twice
    let response = reqwest::get(server.url("/search?gameName=a&gameName=b")).await.unwrap();

    // THEN: JSON 400
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query string"));

    server.stop().await;
}

/// **VALUE**: Verifies a repeated `gameName` on `/checkGog` still answers 200 `{found:false}`.
///
/// **BUG THIS CATCHES**: Would catch a malformed query escaping the never-fails contract
/// of the store lookup.
#[tokio::test]
async fn given_repeated_game_name_when_checking_gog_then_200_not_found() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/games/ajax/filtered"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(0)
        .mount(&upstream)
        .await;
    let server = start_against(&upstream).await;

    let response = reqwest::get(server.url("/checkGog?gameName=a&gameName=b")).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"found": false}));

    server.stop().await;
}

/// **VALUE**: Verifies a slow IGDB on the details path surfaces as a JSON 504.
///
/// **WHY THIS MATTERS**: The browser shows a distinct "timed out" message for 504.
/// The details call has its own timeout, separate from search.
#[tokio::test]
async fn given_slow_upstream_when_fetching_details_then_504() {
    // GIVEN: IGDB answers after 1.5s, details timeout is 200ms
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1942, "name": "The Witcher 3: Wild Hunt"}]))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&upstream)
        .await;
    let mut config = config_for(&upstream);
    config.timeouts.details = Duration::from_millis(200);
    let server = start(AppState::from_config(&config).unwrap()).await;

    // WHEN: Fetching details
    let response = reqwest::get(server.url("/details/1942")).await.unwrap();

    // THEN: 504 with the timeout message
    assert_eq!(response.status().as_u16(), 504);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Request to IGDB timed out");

    server.stop().await;
}

/// **VALUE**: Verifies the liveness probe and CORS headers.
#[tokio::test]
async fn given_running_server_when_probed_then_health_ok_with_cors() {
    let upstream = MockServer::start().await;
    let server = start_against(&upstream).await;

    let response = reqwest::Client::new()
        .get(server.url("/health"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));

    server.stop().await;
}

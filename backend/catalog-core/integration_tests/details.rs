use crate::helpers::{GAMES_PATH, TEST_TIMEOUT, details_proxy, mount_token};

use catalog_core::details::StoreLink;
use catalog_core::error::CatalogError;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies a full IGDB record turns into the detail view the browser renders.
///
/// **WHY THIS MATTERS**: Cover rewriting, date formatting, developer selection and store
/// filtering all run on this path. Any one of them breaking shows up as a broken card.
///
/// **BUG THIS CATCHES**: Would catch a protocol-relative cover URL leaking through, the
/// publisher being shown as developer, or a mislabelled store link being kept.
#[tokio::test]
async fn given_complete_record_when_fetching_details_then_normalized() {
    // GIVEN: A single-game reply for id 1942
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .and(body_string_contains("where id = 1942;"))
        .and(body_string_contains("limit 1;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1942,
            "name": "The Witcher 3: Wild Hunt",
            "cover": {"id": 89386, "url": "//images.igdb.com/igdb/image/upload/t_thumb/co1wyy.jpg"},
            "first_release_date": 1431993600,
            "platforms": [{"name": "PC (Microsoft Windows)"}, {"name": "PlayStation 4"}],
            "involved_companies": [
                {"developer": false, "company": {"name": "Bandai Namco"}},
                {"developer": true, "company": {"name": "CD Projekt RED"}}
            ],
            "websites": [
                {"category": 1, "url": "https://thewitcher.com"},
                {"category": 13, "url": "https://store.steampowered.com/app/292030"},
                {"category": 17, "url": "https://www.gog.com/game/the_witcher_3_wild_hunt"},
                {"category": 16, "url": "https://example.com/not-epic"}
            ]
        }])))
        .expect(1)
        .mount(&server)
        .await;
    let proxy = details_proxy(&server, TEST_TIMEOUT);

    // WHEN: Fetching details
    let details = proxy.get_details(1942).await.unwrap();

    // THEN: Every field is normalized
    assert_eq!(details.name, "The Witcher 3: Wild Hunt");
    assert_eq!(
        details.thumbnail_url.as_deref(),
        Some("https://images.igdb.com/igdb/image/upload/t_cover_big/co1wyy.jpg")
    );
    assert_eq!(details.release_date, "May 19, 2015");
    assert_eq!(details.developer, "CD Projekt RED");
    assert_eq!(details.platforms, vec!["PC (Microsoft Windows)", "PlayStation 4"]);
    assert_eq!(
        details.store_links,
        vec![
            StoreLink {
                name: "Steam".to_string(),
                url: "https://store.steampowered.com/app/292030".to_string(),
            },
            StoreLink {
                name: "GOG".to_string(),
                url: "https://www.gog.com/game/the_witcher_3_wild_hunt".to_string(),
            },
        ]
    );
}

/// **VALUE**: Verifies a sparse record falls back field by field instead of failing.
#[tokio::test]
async fn given_sparse_record_when_fetching_details_then_fallbacks_apply() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 7,
            "involved_companies": [{"developer": false, "company": {"name": "Publisher Inc"}}]
        }])))
        .mount(&server)
        .await;
    let proxy = details_proxy(&server, TEST_TIMEOUT);

    let details = proxy.get_details(7).await.unwrap();

    assert_eq!(details.name, "Unknown");
    assert_eq!(details.thumbnail_url, None);
    assert_eq!(details.release_date, "N/A");
    assert_eq!(details.developer, "N/A");
    assert!(details.platforms.is_empty());
    assert!(details.store_links.is_empty());
}

/// **VALUE**: Verifies an unknown id is a not-found error.
#[tokio::test]
async fn given_unknown_id_when_fetching_details_then_not_found() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let proxy = details_proxy(&server, TEST_TIMEOUT);

    let err = proxy.get_details(999_999_999).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { .. }));
    assert_eq!(err.client_message(), "Game not found: 999999999");
}

/// **VALUE**: Verifies a 403 from IGDB clears the token and maps to 503.
///
/// **BUG THIS CATCHES**: Would catch the rejected token staying cached, which shows up
/// here as the second call skipping the exchange.
#[tokio::test]
async fn given_forbidden_reply_when_fetching_details_then_auth_error_and_cache_cleared() {
    // GIVEN: IGDB rejects every token; the token endpoint must be hit once per call
    let server = MockServer::start().await;
    mount_token(&server, 3600, 2).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(2)
        .mount(&server)
        .await;
    let proxy = details_proxy(&server, TEST_TIMEOUT);

    // WHEN: Fetching twice
    let first = proxy.get_details(1942).await.unwrap_err();
    let second = proxy.get_details(1942).await.unwrap_err();

    // THEN: Auth errors, and each call re-exchanged (verified on drop)
    assert!(matches!(first, CatalogError::Auth { .. }));
    assert_eq!(first.http_status(), 503);
    assert!(matches!(second, CatalogError::Auth { .. }));
}

/// **VALUE**: Verifies the details call honours its own timeout.
#[tokio::test]
async fn given_slow_upstream_when_fetching_details_then_timeout_error() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(GAMES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1942, "name": "The Witcher 3: Wild Hunt"}]))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;
    let proxy = details_proxy(&server, Duration::from_millis(200));

    let err = proxy.get_details(1942).await.unwrap_err();

    assert!(matches!(err, CatalogError::Timeout { .. }));
    assert_eq!(err.http_status(), 504);
}

/// **VALUE**: Verifies id 0 is rejected without contacting IGDB.
#[tokio::test]
async fn given_zero_id_when_fetching_details_then_validation_error() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 0).await;
    let proxy = details_proxy(&server, TEST_TIMEOUT);

    let err = proxy.get_details(0).await.unwrap_err();

    assert!(matches!(err, CatalogError::Validation { .. }));
}

use crate::helpers::{GOG_SEARCH_PATH, gog_checker};

use catalog_core::store::{StoreChecker, StoreLookupResult};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies an exact (normalized) title match yields an absolute store URL.
///
/// **WHY THIS MATTERS**: GOG's search is fuzzy and returns related products first. Only
/// an exact title match may be linked, or users land on the wrong game.
///
/// **BUG THIS CATCHES**: Would catch taking the first product blindly or returning a
/// relative path the browser cannot open.
#[tokio::test]
async fn given_matching_product_when_checking_then_found_with_absolute_url() {
    // GIVEN: Search results where the exact match is not first
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GOG_SEARCH_PATH))
        .and(query_param("mediaType", "game"))
        .and(query_param("search", "The Witcher 3: Wild Hunt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                {"title": "The Witcher 3: Wild Hunt - Blood and Wine", "url": "/game/the_witcher_3_wild_hunt_blood_and_wine"},
                {"title": "The Witcher® 3: Wild Hunt", "url": "/game/the_witcher_3_wild_hunt"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let checker = gog_checker(&server);

    // WHEN: Checking the store
    let result = checker.check_store("The Witcher 3: Wild Hunt").await;

    // THEN: The exact match, made absolute
    assert_eq!(
        result,
        StoreLookupResult::found("https://www.gog.com/game/the_witcher_3_wild_hunt")
    );
}

/// **VALUE**: Verifies only near-miss titles produce "not found".
#[tokio::test]
async fn given_only_related_products_when_checking_then_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GOG_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"title": "Halo Wars 2", "url": "/game/halo_wars_2"}]
        })))
        .mount(&server)
        .await;
    let checker = gog_checker(&server);

    let result = checker.check_store("Halo").await;

    assert_eq!(result, StoreLookupResult::not_found());
}

/// **VALUE**: Verifies a GOG outage degrades to "not found" instead of an error.
///
/// **WHY THIS MATTERS**: Store availability is decoration on the details card. A GOG
/// outage must never break the page.
#[tokio::test]
async fn given_gog_server_error_when_checking_then_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GOG_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let checker = gog_checker(&server);

    let result = checker.check_store("Cyberpunk 2077").await;

    assert!(!result.found);
    assert_eq!(result.url, None);
}

/// **VALUE**: Verifies an unparseable body degrades to "not found".
#[tokio::test]
async fn given_malformed_body_when_checking_then_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GOG_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    let checker = gog_checker(&server);

    let result = checker.check_store("Cyberpunk 2077").await;

    assert_eq!(result, StoreLookupResult::not_found());
}

/// **VALUE**: Verifies the error path is visible to callers that want it.
#[tokio::test]
async fn given_gog_server_error_when_looking_up_then_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GOG_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let checker = gog_checker(&server);

    let err = checker.lookup("Cyberpunk 2077").await.unwrap_err();

    assert!(err.to_string().contains("502"));
}

/// **VALUE**: Verifies a blank name answers without a network call.
#[tokio::test]
async fn given_blank_name_when_checking_then_not_found_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GOG_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(0)
        .mount(&server)
        .await;
    let checker = gog_checker(&server);

    let result = checker.check_store("   ").await;

    assert_eq!(result, StoreLookupResult::not_found());
    assert_eq!(checker.name(), "GOG");
}

//! Test helpers for catalog-core integration tests.
//!
//! One wiremock server stands in for every upstream: the Twitch token endpoint
//! lives at `/oauth2/token`, IGDB at `/games`, GOG at `/games/ajax/filtered`.

use catalog_core::config::Credentials;
use catalog_core::details::DetailsProxy;
use catalog_core::igdb::IgdbClient;
use catalog_core::search::SearchProxy;
use catalog_core::store::GogStoreChecker;
use catalog_core::token::TokenManager;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

pub const TEST_CLIENT_ID: &str = "test-client-id";
pub const TEST_CLIENT_SECRET: &str = "test-client-secret";
pub const TEST_ACCESS_TOKEN: &str = "test-access-token";
pub const TOKEN_PATH: &str = "/oauth2/token";
pub const GAMES_PATH: &str = "/games";
pub const GOG_SEARCH_PATH: &str = "/games/ajax/filtered";

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

pub fn base_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("mock server uri")
}

pub fn token_manager(server: &MockServer) -> Arc<TokenManager> {
    let token_url = Url::parse(&format!("{}{TOKEN_PATH}", server.uri())).expect("token url");
    Arc::new(TokenManager::new(
        Client::new(),
        token_url,
        Credentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET),
        TEST_TIMEOUT,
    ))
}

pub fn igdb_client(server: &MockServer) -> IgdbClient {
    IgdbClient::new(Client::new(), base_url(server), token_manager(server))
}

pub fn search_proxy(server: &MockServer, timeout: Duration) -> SearchProxy {
    SearchProxy::new(igdb_client(server), timeout)
}

pub fn details_proxy(server: &MockServer, timeout: Duration) -> DetailsProxy {
    DetailsProxy::new(igdb_client(server), timeout)
}

pub fn gog_checker(server: &MockServer) -> GogStoreChecker {
    GogStoreChecker::new(Client::new(), base_url(server), TEST_TIMEOUT)
}

/// Mount a successful token exchange that must be hit `expected_calls` times.
pub async fn mount_token(server: &MockServer, expires_in: u64, expected_calls: impl Into<Times>) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(query_param("client_id", TEST_CLIENT_ID))
        .and(query_param("client_secret", TEST_CLIENT_SECRET))
        .and(query_param("grant_type", "client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_ACCESS_TOKEN,
            "expires_in": expires_in,
            "token_type": "bearer"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

//! Spins up the real router on an ephemeral port, with every upstream
//! pointed at one wiremock server.

use igdb_proxy::server::serve;
use igdb_proxy::state::AppState;

use catalog_core::config::ProxyConfig;
use catalog_core::store::{StoreChecker, StoreLookupResult};

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/oauth2/token";
pub const GAMES_PATH: &str = "/games";

pub struct TestServer {
    pub address: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{path_and_query}", self.address)
    }

    /// Trigger graceful shutdown and wait for the serve loop to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap();
    }
}

pub fn config_for(upstream: &MockServer) -> ProxyConfig {
    let uri = upstream.uri();
    let vars: HashMap<&str, String> = HashMap::from([
        ("TWITCH_CLIENT_ID", "test-client-id".to_string()),
        ("TWITCH_CLIENT_SECRET", "test-client-secret".to_string()),
        ("IGDB_API_URL", uri.clone()),
        ("TWITCH_TOKEN_URL", format!("{uri}{TOKEN_PATH}")),
        ("GOG_CATALOG_URL", uri),
    ]);

    ProxyConfig::from_lookup(move |key: &str| vars.get(key).cloned()).unwrap()
}

pub async fn start(state: AppState) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        serve(listener, Arc::new(state), async {
            let _ = rx.await;
        })
        .await
        .unwrap();
    });

    TestServer {
        address,
        shutdown: Some(tx),
        handle,
    }
}

pub async fn start_against(upstream: &MockServer) -> TestServer {
    let state = AppState::from_config(&config_for(upstream)).unwrap();
    start(state).await
}

pub async fn mount_token(upstream: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-access-token",
            "expires_in": 3600,
            "token_type": "bearer"
        })))
        .mount(upstream)
        .await;
}

/// Store checker with a fixed answer, for exercising the trait-object seam.
pub struct FixedStoreChecker(pub StoreLookupResult);

#[async_trait]
impl StoreChecker for FixedStoreChecker {
    fn name(&self) -> &str {
        "Fixed"
    }

    async fn check_store(&self, _game_name: &str) -> StoreLookupResult {
        self.0.clone()
    }
}

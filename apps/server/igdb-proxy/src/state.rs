//! Shared per-process state handed to every handler.

use crate::error::ProxyError;

use catalog_core::config::ProxyConfig;
use catalog_core::details::DetailsProxy;
use catalog_core::igdb::IgdbClient;
use catalog_core::search::SearchProxy;
use catalog_core::store::{GogStoreChecker, StoreChecker};
use catalog_core::token::TokenManager;

use std::sync::Arc;

use log::info;
use reqwest::Client;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct AppState {
    pub search: SearchProxy,
    pub details: DetailsProxy,
    pub store_checker: Arc<dyn StoreChecker>,
}

impl AppState {
    pub fn new(search: SearchProxy, details: DetailsProxy, store_checker: Arc<dyn StoreChecker>) -> Self {
        Self {
            search,
            details,
            store_checker,
        }
    }

    /// Wire every component to one pooled HTTP client and one token cache.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Startup`] if the HTTP client cannot be built.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProxyError::startup(format!("Failed to build HTTP client: {e}")))?;

        let tokens = Arc::new(TokenManager::new(
            http.clone(),
            config.endpoints.twitch_token.clone(),
            config.credentials.clone(),
            config.timeouts.token,
        ));

        let igdb = IgdbClient::new(http.clone(), config.endpoints.igdb_api.clone(), tokens);

        let store_checker = GogStoreChecker::new(
            http,
            config.endpoints.gog_catalog.clone(),
            config.timeouts.store,
        );

        info!(
            "Upstreams: IGDB {}, token {}, GOG {}",
            config.endpoints.igdb_api, config.endpoints.twitch_token, config.endpoints.gog_catalog
        );

        Ok(Self::new(
            SearchProxy::new(igdb.clone(), config.timeouts.search),
            DetailsProxy::new(igdb, config.timeouts.details),
            Arc::new(store_checker),
        ))
    }
}

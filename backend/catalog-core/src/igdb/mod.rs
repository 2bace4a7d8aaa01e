//! Authenticated client for the IGDB v4 API.

pub mod models;
pub mod query;

pub use models::IgdbGame;
pub use query::IgdbQueryBuilder;

use crate::error::CatalogError;
use crate::token::TokenManager;

use common::HttpStatusCode;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

pub const IGDB_GAMES_ENDPOINT: &str = "games";
const IGDB_CLIENT_ID_HEADER: &str = "Client-ID";

#[derive(Clone)]
pub struct IgdbClient {
    http: Client,
    base_url: Url,
    tokens: Arc<TokenManager>,
}

impl IgdbClient {
    pub fn new(http: Client, base_url: Url, tokens: Arc<TokenManager>) -> Self {
        Self {
            http,
            base_url,
            tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// POST an Apicalypse body to `endpoint` and decode the JSON array reply.
    ///
    /// A 401/403 reply drops the cached token before returning
    /// [`CatalogError::Auth`], so the caller's next request re-authenticates.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Auth`] if no token could be obtained or IGDB rejected it
    /// - [`CatalogError::Timeout`] if IGDB did not answer within `timeout`
    /// - [`CatalogError::Upstream`] for any other non-2xx reply
    /// - [`CatalogError::Network`] / [`CatalogError::Internal`] for transport or decode failures
    pub async fn query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: String,
        timeout: Duration,
    ) -> Result<Vec<T>, CatalogError> {
        let token = self.tokens.get_valid_token().await?;
        let url = self.base_url.join(endpoint)?;

        debug!("IGDB {endpoint} <- {body}");

        let response = self
            .http
            .post(url)
            .header(IGDB_CLIENT_ID_HEADER, self.tokens.client_id())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "text/plain")
            .bearer_auth(token.value())
            .timeout(timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| CatalogError::from_reqwest(&e, timeout))?;

        let status = HttpStatusCode(response.status().as_u16());

        if status.is_auth_failure() {
            warn!("IGDB rejected the access token (HTTP {status}), clearing token cache");
            self.tokens.invalidate().await;
            return Err(CatalogError::auth(format!(
                "IGDB rejected the access token (HTTP {status})"
            )));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("IGDB {endpoint} returned HTTP {status}: {text}");
            return Err(CatalogError::upstream(status.0, text));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| CatalogError::from_reqwest(&e, timeout))
    }
}

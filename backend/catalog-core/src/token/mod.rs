//! Bearer token cache for the IGDB API.
//!
//! IGDB authenticates with a Twitch app access token obtained through the
//! OAuth client-credentials flow. [`TokenManager`] owns the only copy of that
//! token and hands out clones.
//!
//! # Lifecycle
//!
//! - A cached token is reused while `now < expires_at - 60s`.
//! - Otherwise a credential exchange runs and its result replaces the cache.
//! - A failed exchange clears the cache.
//! - [`TokenManager::invalidate`] clears the cache after IGDB rejects a token
//!   (401/403); the next call re-exchanges. There is no retry loop.
//!
//! # Concurrency
//!
//! The lock is never held across the exchange request. Two requests that both
//! find the cache stale will both exchange; the last write wins and either
//! token is valid.

use crate::config::Credentials;
use crate::error::TokenError;

use common::RedactedSecret;

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use url::Url;

/// Tokens this close to expiry are treated as already expired.
pub const TOKEN_SAFETY_MARGIN: Duration = Duration::from_secs(60);

const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// A bearer token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: RedactedSecret,
    expires_at: Instant,
}

impl AccessToken {
    /// # Errors
    ///
    /// Returns [`TokenError::Decode`] if `expires_in` does not fit in an [`Instant`].
    #[track_caller]
    pub fn new(value: impl Into<String>, expires_in: Duration) -> Result<Self, TokenError> {
        let expires_at = Instant::now()
            .checked_add(expires_in)
            .ok_or_else(|| TokenError::decode(format!("expires_in out of range: {}s", expires_in.as_secs())))?;

        Ok(Self {
            value: RedactedSecret::new("access_token", value),
            expires_at,
        })
    }

    /// Raw token for the `Authorization` header.
    pub fn value(&self) -> &str {
        self.value.expose()
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// True while `now` is more than [`TOKEN_SAFETY_MARGIN`] before expiry.
    pub fn is_usable_at(&self, now: Instant) -> bool {
        now + TOKEN_SAFETY_MARGIN < self.expires_at
    }
}

/// Twitch `/oauth2/token` response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    #[serde(default)]
    token_type: Option<String>,
}

pub struct TokenManager {
    http: Client,
    token_url: Url,
    credentials: Credentials,
    timeout: Duration,
    cached: RwLock<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(http: Client, token_url: Url, credentials: Credentials, timeout: Duration) -> Self {
        Self {
            http,
            token_url,
            credentials,
            timeout,
            cached: RwLock::new(None),
        }
    }

    /// Client id sent alongside the bearer token on every IGDB call.
    pub fn client_id(&self) -> &str {
        &self.credentials.client_id
    }

    /// Return the cached token, or exchange credentials for a new one.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the exchange fails. The cache is empty afterwards.
    pub async fn get_valid_token(&self) -> Result<AccessToken, TokenError> {
        if let Some(token) = self.cached_token().await {
            debug!("Reusing cached IGDB access token");
            return Ok(token);
        }

        info!("Requesting new IGDB access token");

        match self.exchange().await {
            Ok(token) => {
                *self.cached.write().await = Some(token.clone());
                Ok(token)
            }
            Err(e) => {
                warn!("Credential exchange failed: {e}");
                self.invalidate().await;
                Err(e)
            }
        }
    }

    /// Drop the cached token so the next call performs a fresh exchange.
    pub async fn invalidate(&self) {
        if self.cached.write().await.take().is_some() {
            info!("IGDB access token invalidated");
        }
    }

    async fn cached_token(&self) -> Option<AccessToken> {
        let now = Instant::now();
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_usable_at(now))
            .cloned()
    }

    async fn exchange(&self) -> Result<AccessToken, TokenError> {
        let mut url = self.token_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("client_secret", self.credentials.client_secret.expose())
            .append_pair("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS);

        let response = self
            .http
            .post(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| TokenError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenError::exchange(
                status.as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::from_reqwest(&e))?;

        if body.access_token.trim().is_empty() {
            return Err(TokenError::decode("Token response has an empty access_token"));
        }

        if let Some(token_type) = body.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                warn!("Unexpected token_type '{token_type}', using it as a bearer token anyway");
            }
        }

        let token = AccessToken::new(body.access_token, Duration::from_secs(body.expires_in))?;
        info!("Obtained IGDB access token (expires in {}s)", body.expires_in);
        Ok(token)
    }
}

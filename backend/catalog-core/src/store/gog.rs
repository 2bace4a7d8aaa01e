//! GOG catalog lookup.
//!
//! Queries GOG's catalog search (`games/ajax/filtered`) and accepts a product
//! only when its title matches the requested name after normalization.

use super::{StoreChecker, StoreLookupResult};
use crate::GOG_STORE_BASE_URL;
use crate::error::StoreError;

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

const GOG_SEARCH_ENDPOINT: &str = "games/ajax/filtered";
const GOG_STORE_NAME: &str = "GOG";

/// Anything that is not a letter or digit, including ™ and ®.
const TITLE_NOISE_PATTERN: &str = r"[^\p{L}\p{N}]+";

static TITLE_NOISE_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_title_noise_regex() -> &'static Regex {
    TITLE_NOISE_REGEX.get_or_init(|| Regex::new(TITLE_NOISE_PATTERN).expect("valid regex pattern"))
}

/// Lowercase and strip punctuation, whitespace and trademark marks.
pub fn normalize_title(title: &str) -> String {
    get_title_noise_regex()
        .replace_all(&title.to_lowercase(), "")
        .into_owned()
}

#[derive(Debug, Deserialize)]
struct GogSearchResponse {
    #[serde(default)]
    products: Vec<GogProduct>,
}

#[derive(Debug, Deserialize)]
struct GogProduct {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Clone)]
pub struct GogStoreChecker {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl GogStoreChecker {
    pub fn new(http: Client, base_url: Url, timeout: Duration) -> Self {
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// Product URL of the first exact title match, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport, status or decode failure.
    pub async fn lookup(&self, game_name: &str) -> Result<Option<String>, StoreError> {
        let mut url = self.base_url.join(GOG_SEARCH_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("mediaType", "game")
            .append_pair("search", game_name);

        let response = self.http.get(url).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::status(status.as_u16()));
        }

        let body: GogSearchResponse = response.json().await?;
        let wanted = normalize_title(game_name);

        let product_path = body
            .products
            .into_iter()
            .filter(|product| {
                product
                    .title
                    .as_deref()
                    .is_some_and(|title| normalize_title(title) == wanted)
            })
            .find_map(|product| product.url);

        match product_path {
            Some(path) => Ok(Some(absolute_product_url(&path)?)),
            None => Ok(None),
        }
    }
}

/// GOG returns product paths like `/game/witcher_3`; make them absolute.
fn absolute_product_url(path: &str) -> Result<String, StoreError> {
    let base = Url::parse(GOG_STORE_BASE_URL)?;
    Ok(base.join(path)?.to_string())
}

#[async_trait]
impl StoreChecker for GogStoreChecker {
    fn name(&self) -> &str {
        GOG_STORE_NAME
    }

    async fn check_store(&self, game_name: &str) -> StoreLookupResult {
        let game_name = game_name.trim();
        if game_name.is_empty() {
            return StoreLookupResult::not_found();
        }

        match self.lookup(game_name).await {
            Ok(Some(url)) => {
                info!("{GOG_STORE_NAME} match for '{game_name}': {url}");
                StoreLookupResult::found(url)
            }
            Ok(None) => {
                debug!("No {GOG_STORE_NAME} match for '{game_name}'");
                StoreLookupResult::not_found()
            }
            Err(e) => {
                warn!("{GOG_STORE_NAME} lookup for '{game_name}' failed: {e}");
                StoreLookupResult::not_found()
            }
        }
    }
}

//! Storefront availability lookups.
//!
//! A [`StoreChecker`] answers one question: does this store sell a game with
//! this name, and at which URL? Lookups are best-effort. Implementations
//! never return an error; anything that goes wrong is logged and reported as
//! "not found".

pub mod gog;

pub use gog::GogStoreChecker;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreLookupResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StoreLookupResult {
    pub fn found(url: impl Into<String>) -> Self {
        Self {
            found: true,
            url: Some(url.into()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            url: None,
        }
    }
}

#[async_trait]
pub trait StoreChecker: Send + Sync {
    /// Store name for logs.
    fn name(&self) -> &str;

    /// Look up a game by name. Failures degrade to [`StoreLookupResult::not_found`].
    async fn check_store(&self, game_name: &str) -> StoreLookupResult;
}

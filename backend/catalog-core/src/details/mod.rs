//! Single-game detail lookup against IGDB.

pub mod store_links;

pub use store_links::{StoreLink, Storefront, extract_store_links};

use crate::NOT_AVAILABLE;
use crate::error::CatalogError;
use crate::igdb::models::{IgdbCover, IgdbInvolvedCompany};
use crate::igdb::{IGDB_GAMES_ENDPOINT, IgdbClient, IgdbGame, IgdbQueryBuilder};

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

const DETAILS_FIELDS: [&str; 8] = [
    "name",
    "cover.url",
    "first_release_date",
    "platforms.name",
    "involved_companies.developer",
    "involved_companies.company.name",
    "websites.url",
    "websites.category",
];

const COVER_THUMB_SEGMENT: &str = "t_thumb";
const COVER_BIG_SEGMENT: &str = "t_cover_big";

/// "January 15, 2020". chrono's month names are English regardless of locale.
const RELEASE_DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetails {
    pub name: String,
    pub thumbnail_url: Option<String>,
    pub release_date: String,
    pub developer: String,
    pub platforms: Vec<String>,
    pub store_links: Vec<StoreLink>,
}

impl From<IgdbGame> for GameDetails {
    fn from(game: IgdbGame) -> Self {
        Self {
            name: game.display_name(),
            thumbnail_url: cover_url(game.cover.as_ref()),
            release_date: format_release_date(game.first_release_date),
            developer: developer_name(&game.involved_companies),
            platforms: game.platform_names(),
            store_links: extract_store_links(&game.websites),
        }
    }
}

/// Large cover URL, absolute.
pub fn cover_url(cover: Option<&IgdbCover>) -> Option<String> {
    let url = cover?.url.as_deref()?.trim();
    if url.is_empty() {
        return None;
    }

    let url = url.replace(COVER_THUMB_SEGMENT, COVER_BIG_SEGMENT);
    if url.starts_with("//") {
        Some(format!("https:{url}"))
    } else {
        Some(url)
    }
}

/// Long UTC date for a Unix-seconds timestamp, or "N/A".
pub fn format_release_date(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|date| date.format(RELEASE_DATE_FORMAT).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// First company flagged as developer with a usable name, or "N/A".
pub fn developer_name(companies: &[IgdbInvolvedCompany]) -> String {
    companies
        .iter()
        .filter(|involved| involved.developer == Some(true))
        .filter_map(|involved| involved.company.as_ref()?.name.as_deref())
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(String::from)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Parse a path segment as a positive game id.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] for anything other than a positive integer.
#[track_caller]
pub fn parse_game_id(raw: &str) -> Result<u64, CatalogError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CatalogError::validation(format!(
            "Invalid game id '{raw}': must be a positive integer"
        ))),
    }
}

/// Apicalypse body for one game by id.
pub fn details_query_body(id: u64) -> Result<String, CatalogError> {
    IgdbQueryBuilder::default()
        .with_fields(DETAILS_FIELDS)
        .with_filter(format!("id = {id}"))
        .with_limit(1)
        .build()
}

#[derive(Clone)]
pub struct DetailsProxy {
    igdb: IgdbClient,
    timeout: Duration,
}

impl DetailsProxy {
    pub fn new(igdb: IgdbClient, timeout: Duration) -> Self {
        Self { igdb, timeout }
    }

    /// Fetch and normalize one game.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] if `id` is 0
    /// - [`CatalogError::NotFound`] if IGDB has no game with that id
    /// - anything [`IgdbClient::query`] returns
    pub async fn get_details(&self, id: u64) -> Result<GameDetails, CatalogError> {
        if id == 0 {
            return Err(CatalogError::validation("Invalid game id '0': must be a positive integer"));
        }

        let body = details_query_body(id)?;
        let games: Vec<IgdbGame> = self
            .igdb
            .query(IGDB_GAMES_ENDPOINT, body, self.timeout)
            .await?;

        let game = games
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::not_found(format!("Game not found: {id}")))?;

        let details = GameDetails::from(game);
        info!(
            "IGDB details {id} -> '{}' ({} store links)",
            details.name,
            details.store_links.len()
        );
        Ok(details)
    }
}

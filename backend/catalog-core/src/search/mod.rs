//! Game search against IGDB.
//!
//! Results are reduced to what the result list in the browser needs: id,
//! name, release year, a readable type label and platform names.

use crate::NOT_AVAILABLE;
use crate::error::CatalogError;
use crate::igdb::{IGDB_GAMES_ENDPOINT, IgdbClient, IgdbGame, IgdbQueryBuilder};

use std::ops::RangeInclusive;
use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use log::info;
use serde::Serialize;

/// Upper bound on returned items.
pub const SEARCH_RESULT_LIMIT: usize = 35;

/// DLC, expansion, episode, season.
pub const EXCLUDED_CATEGORIES: [u32; 4] = [1, 2, 6, 7];

const SEARCH_FIELDS: [&str; 5] = [
    "name",
    "first_release_date",
    "category",
    "parent_game",
    "platforms.name",
];

const FOUR_DIGIT_YEARS: RangeInclusive<i32> = 1000..=9999;

const LABEL_VERSION_PORT: &str = "Version/Port";
const LABEL_GAME: &str = "Game";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultItem {
    pub id: u64,
    pub name: String,
    /// Four-digit release year or "N/A".
    pub year: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub platforms: Vec<String>,
}

impl From<IgdbGame> for SearchResultItem {
    fn from(game: IgdbGame) -> Self {
        Self {
            id: game.id,
            name: game.display_name(),
            year: release_year(game.first_release_date),
            kind: category_label(game.category, game.parent_game.is_some()).to_string(),
            platforms: game.platform_names(),
        }
    }
}

/// Readable label for an IGDB category code.
///
/// A main game (0) that points at a parent is really a version or port of
/// that parent, so it is labelled as one.
pub fn category_label(category: Option<u32>, has_parent: bool) -> &'static str {
    match (category, has_parent) {
        (Some(0), true) => LABEL_VERSION_PORT,
        (Some(0), false) => "Main Game",
        (Some(3), _) => "Bundle",
        (Some(4), _) => "Standalone Expansion",
        (Some(5), _) => "Mod",
        (Some(8), _) => "Remake",
        (Some(9), _) => "Remaster",
        (Some(10), _) => "Expanded Game",
        (Some(11), _) => "Port",
        (Some(12), _) => "Fork",
        (_, true) => LABEL_VERSION_PORT,
        (_, false) => LABEL_GAME,
    }
}

/// UTC year of a Unix-seconds timestamp, or "N/A" outside the four-digit range.
pub fn release_year(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|date| date.year())
        .filter(|year| FOUR_DIGIT_YEARS.contains(year))
        .map(|year| year.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Normalize upstream records, keeping upstream order and capping the count.
pub fn normalize_search_results(games: Vec<IgdbGame>) -> Vec<SearchResultItem> {
    games
        .into_iter()
        .take(SEARCH_RESULT_LIMIT)
        .map(SearchResultItem::from)
        .collect()
}

/// Apicalypse body for a search.
pub fn search_query_body(query: &str) -> Result<String, CatalogError> {
    let excluded = EXCLUDED_CATEGORIES
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");

    IgdbQueryBuilder::default()
        .with_search(query)
        .with_fields(SEARCH_FIELDS)
        .with_filter(format!("category != ({excluded})"))
        .with_limit(SEARCH_RESULT_LIMIT)
        .build()
}

#[derive(Clone)]
pub struct SearchProxy {
    igdb: IgdbClient,
    timeout: Duration,
}

impl SearchProxy {
    pub fn new(igdb: IgdbClient, timeout: Duration) -> Self {
        Self { igdb, timeout }
    }

    /// Search IGDB by free text.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] for a blank query
    /// - [`CatalogError::NotFound`] when IGDB returns no records
    /// - anything [`IgdbClient::query`] returns
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::validation("Game name is required"));
        }

        let body = search_query_body(query)?;
        let games: Vec<IgdbGame> = self
            .igdb
            .query(IGDB_GAMES_ENDPOINT, body, self.timeout)
            .await?;

        if games.is_empty() {
            info!("No IGDB results for '{query}'");
            return Err(CatalogError::not_found(format!("No games found for '{query}'")));
        }

        let results = normalize_search_results(games);
        info!("IGDB search '{query}' -> {} results", results.len());
        Ok(results)
    }
}

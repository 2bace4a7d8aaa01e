pub mod config;
pub mod details;
pub mod error;
pub mod igdb;
pub mod search;
pub mod store;
pub mod token;

#[cfg(test)]
mod tests;

pub const IGDB_API_HOSTNAME: &str = "api.igdb.com";
pub const IGDB_API_BASE_URL: &str = const_format::concatcp!("https://", IGDB_API_HOSTNAME, "/v4/");

pub const TWITCH_ID_HOSTNAME: &str = "id.twitch.tv";
pub const TWITCH_TOKEN_URL: &str = const_format::concatcp!("https://", TWITCH_ID_HOSTNAME, "/oauth2/token");

pub const GOG_CATALOG_BASE_URL: &str = "https://embed.gog.com/";
pub const GOG_STORE_BASE_URL: &str = "https://www.gog.com";

/// Fallback for any normalized text field the upstream record leaves empty.
pub const NOT_AVAILABLE: &str = "N/A";

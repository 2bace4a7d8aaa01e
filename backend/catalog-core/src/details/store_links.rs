//! Storefront links picked out of IGDB website metadata.
//!
//! IGDB tags each website with a category code. Only the storefronts below
//! are kept, and only when the URL actually looks like a product page for
//! that store; IGDB data is crowd-edited and mislabelled links are common.

use crate::igdb::models::IgdbWebsite;

use log::warn;
use serde::Serialize;

pub const WEBSITE_CATEGORY_STEAM: u32 = 13;
pub const WEBSITE_CATEGORY_ITCH: u32 = 15;
pub const WEBSITE_CATEGORY_EPIC: u32 = 16;
pub const WEBSITE_CATEGORY_GOG: u32 = 17;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storefront {
    Steam,
    Itch,
    EpicGames,
    Gog,
}

impl Storefront {
    pub fn from_category(category: u32) -> Option<Self> {
        match category {
            WEBSITE_CATEGORY_STEAM => Some(Storefront::Steam),
            WEBSITE_CATEGORY_ITCH => Some(Storefront::Itch),
            WEBSITE_CATEGORY_EPIC => Some(Storefront::EpicGames),
            WEBSITE_CATEGORY_GOG => Some(Storefront::Gog),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Storefront::Steam => "Steam",
            Storefront::Itch => "itch.io",
            Storefront::EpicGames => "Epic Games",
            Storefront::Gog => "GOG",
        }
    }

    /// Substrings a product URL for this store must contain (any one of them).
    pub fn url_patterns(&self) -> &'static [&'static str] {
        match self {
            Storefront::Steam => &["store.steampowered.com/app/"],
            Storefront::Itch => &[".itch.io/"],
            Storefront::EpicGames => &["store.epicgames.com/", "epicgames.com/store/"],
            Storefront::Gog => &["gog.com/"],
        }
    }

    pub fn accepts(&self, url: &str) -> bool {
        let url = url.to_ascii_lowercase();
        self.url_patterns().iter().any(|pattern| url.contains(pattern))
    }
}

/// Store links in encounter order, at most one per storefront.
pub fn extract_store_links(websites: &[IgdbWebsite]) -> Vec<StoreLink> {
    let mut seen: Vec<Storefront> = Vec::new();
    let mut links = Vec::new();

    for website in websites {
        let Some(store) = website.category.and_then(Storefront::from_category) else {
            continue;
        };

        let Some(url) = website.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) else {
            continue;
        };

        if seen.contains(&store) {
            continue;
        }

        if !store.accepts(url) {
            warn!(
                "Rejecting {} link that does not match {:?}: {url}",
                store.display_name(),
                store.url_patterns()
            );
            continue;
        }

        seen.push(store);
        links.push(StoreLink {
            name: store.display_name().to_string(),
            url: url.to_string(),
        });
    }

    links
}

// Unit tests for storefront link extraction

use crate::details::{StoreLink, Storefront, extract_store_links};
use crate::igdb::models::IgdbWebsite;

fn site(category: u32, url: &str) -> IgdbWebsite {
    IgdbWebsite {
        url: Some(url.to_string()),
        category: Some(category),
    }
}

/// **VALUE**: Verifies the category → store mapping, including the GOG/itch.io split.
///
/// **WHY THIS MATTERS**: Category 17 is GOG. itch.io has its own code (15); mapping
/// both to 17 would label every GOG link as itch.io or the other way around.
#[test]
fn given_website_categories_when_mapped_then_known_stores_only() {
    assert_eq!(Storefront::from_category(13), Some(Storefront::Steam));
    assert_eq!(Storefront::from_category(15), Some(Storefront::Itch));
    assert_eq!(Storefront::from_category(16), Some(Storefront::EpicGames));
    assert_eq!(Storefront::from_category(17), Some(Storefront::Gog));
    assert_eq!(Storefront::from_category(1), None);
    assert_eq!(Storefront::from_category(3), None);
}

/// **VALUE**: Verifies that links are kept only when the URL matches the store.
///
/// **WHY THIS MATTERS**: IGDB websites are user-edited; a "Steam" entry pointing at a
/// community hub or a fan site would send buyers to the wrong page.
///
/// **BUG THIS CATCHES**: Would catch the URL pattern check being skipped.
#[test]
fn given_mislabelled_links_when_extracted_then_rejected() {
    // GIVEN: A Steam-tagged community URL and a GOG-tagged wiki URL
    let websites = vec![
        site(13, "https://steamcommunity.com/app/1145360"),
        site(17, "https://witcher.fandom.com/wiki/GOG"),
    ];

    // WHEN: Extracting
    let links = extract_store_links(&websites);

    // THEN: Nothing survives
    assert!(links.is_empty());
}

/// **VALUE**: Verifies encounter order and one link per store.
///
/// **BUG THIS CATCHES**: Would catch sorting by name or duplicate store entries.
#[test]
fn given_valid_links_with_duplicates_when_extracted_then_first_per_store_in_order() {
    // GIVEN: GOG, Steam, a bad Steam, a second Steam, Epic, itch, an unrelated site
    let websites = vec![
        site(17, "https://www.gog.com/en/game/the_witcher_3_wild_hunt"),
        site(13, "https://store.steampowered.com/app/292030/"),
        site(13, "https://example.com/steam"),
        site(13, "https://store.steampowered.com/app/499450/"),
        site(16, "https://store.epicgames.com/p/the-witcher-3-wild-hunt"),
        site(15, "https://somedev.itch.io/some-game"),
        site(1, "https://thewitcher.com"),
    ];

    // WHEN: Extracting
    let links = extract_store_links(&websites);

    // THEN: GOG, Steam (first valid), Epic, itch.io
    assert_eq!(
        links,
        vec![
            StoreLink {
                name: String::from("GOG"),
                url: String::from("https://www.gog.com/en/game/the_witcher_3_wild_hunt"),
            },
            StoreLink {
                name: String::from("Steam"),
                url: String::from("https://store.steampowered.com/app/292030/"),
            },
            StoreLink {
                name: String::from("Epic Games"),
                url: String::from("https://store.epicgames.com/p/the-witcher-3-wild-hunt"),
            },
            StoreLink {
                name: String::from("itch.io"),
                url: String::from("https://somedev.itch.io/some-game"),
            },
        ]
    );
}

/// **VALUE**: A rejected link does not block a later valid one for the same store.
#[test]
fn given_bad_then_good_link_for_same_store_when_extracted_then_good_kept() {
    let websites = vec![
        site(13, "https://steamcommunity.com/app/1"),
        site(13, "https://store.steampowered.com/app/1/"),
    ];

    let links = extract_store_links(&websites);

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://store.steampowered.com/app/1/");
}

#[test]
fn given_entries_missing_url_or_category_when_extracted_then_skipped() {
    let websites = vec![
        IgdbWebsite {
            url: None,
            category: Some(13),
        },
        IgdbWebsite {
            url: Some(String::from("https://store.steampowered.com/app/1/")),
            category: None,
        },
    ];

    assert!(extract_store_links(&websites).is_empty());
}

#[test]
fn given_legacy_epic_store_url_when_checked_then_accepted() {
    assert!(Storefront::EpicGames.accepts("https://www.epicgames.com/store/en-US/p/control"));
    assert!(Storefront::Steam.accepts("HTTPS://STORE.STEAMPOWERED.COM/APP/10/"));
}

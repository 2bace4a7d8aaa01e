// Unit tests for search normalization
// Upstream round-trips live in integration_tests/search.rs

use crate::igdb::IgdbGame;
use crate::igdb::models::IgdbPlatform;
use crate::search::{
    EXCLUDED_CATEGORIES, SEARCH_RESULT_LIMIT, SearchResultItem, category_label,
    normalize_search_results, release_year, search_query_body,
};

fn platform(name: Option<&str>) -> IgdbPlatform {
    IgdbPlatform {
        name: name.map(String::from),
    }
}

/// **VALUE**: Verifies the full category label table.
///
/// **WHY THIS MATTERS**: The result list shows this label next to every game; a wrong
/// label sends users to the wrong edition.
///
/// **BUG THIS CATCHES**: Would catch a shifted or missing arm in the match.
#[test]
fn given_known_category_codes_when_labelled_then_match_fixed_table() {
    // GIVEN: Every known code without a parent
    let expected = [
        (0, "Main Game"),
        (3, "Bundle"),
        (4, "Standalone Expansion"),
        (5, "Mod"),
        (8, "Remake"),
        (9, "Remaster"),
        (10, "Expanded Game"),
        (11, "Port"),
        (12, "Fork"),
    ];

    // WHEN/THEN: Each maps to its label
    for (code, label) in expected {
        assert_eq!(category_label(Some(code), false), label, "code {code}");
    }
}

/// **VALUE**: Verifies that a main game with a parent is reported as a version/port.
///
/// **WHY THIS MATTERS**: IGDB lists console ports as category 0 with a parent_game.
/// Showing them as "Main Game" puts several "main games" with the same name in the list.
///
/// **BUG THIS CATCHES**: Would catch the override being dropped or applied after the table lookup.
#[test]
fn given_main_game_with_parent_when_labelled_then_version_port() {
    assert_eq!(category_label(Some(0), true), "Version/Port");
}

/// **VALUE**: Verifies the fallbacks for unknown or missing codes.
#[test]
fn given_unknown_category_when_labelled_then_falls_back_on_parent() {
    assert_eq!(category_label(Some(99), true), "Version/Port");
    assert_eq!(category_label(Some(99), false), "Game");
    assert_eq!(category_label(None, true), "Version/Port");
    assert_eq!(category_label(None, false), "Game");
}

/// **VALUE**: Known codes keep their label even when a parent is present.
#[test]
fn given_remake_with_parent_when_labelled_then_keeps_remake() {
    assert_eq!(category_label(Some(8), true), "Remake");
}

/// **VALUE**: Verifies year extraction and its fallback.
///
/// **BUG THIS CATCHES**: Would catch using local time instead of UTC (1 Jan 00:00 UTC
/// would become the previous year west of Greenwich).
#[test]
fn given_release_timestamps_when_year_derived_then_utc_year_or_na() {
    // 2017-03-03T00:00:00Z, Breath of the Wild
    assert_eq!(release_year(Some(1_488_499_200)), "2017");
    // 2020-01-01T00:00:00Z exactly
    assert_eq!(release_year(Some(1_577_836_800)), "2020");
    assert_eq!(release_year(None), "N/A");
}

/// **VALUE**: Verifies the year is always four digits or "N/A".
///
/// **BUG THIS CATCHES**: Would catch a far-future timestamp rendering as "10000".
#[test]
fn given_timestamps_outside_four_digit_years_when_year_derived_then_na() {
    // 9999-12-31T23:59:59Z
    assert_eq!(release_year(Some(253_402_300_799)), "9999");
    // 10000-01-01T00:00:00Z
    assert_eq!(release_year(Some(253_402_300_800)), "N/A");
    // Year 702
    assert_eq!(release_year(Some(-40_000_000_000)), "N/A");
    assert_eq!(release_year(Some(i64::MAX)), "N/A");
}

/// **VALUE**: Verifies that one upstream record becomes one fully-shaped item.
///
/// **WHY THIS MATTERS**: The frontend reads every field without null checks.
///
/// **BUG THIS CATCHES**: Would catch null platform names leaking into the list, or a
/// missing name producing an empty string.
#[test]
fn given_sparse_record_when_normalized_then_every_field_has_a_value() {
    // GIVEN: A record with nothing but an id and a platform without a name
    let game = IgdbGame {
        id: 7,
        platforms: vec![platform(Some("Nintendo Switch")), platform(None), platform(Some("  "))],
        ..IgdbGame::default()
    };

    // WHEN: Normalizing
    let item = SearchResultItem::from(game);

    // THEN: Fallbacks everywhere, unnamed platforms dropped
    assert_eq!(item.id, 7);
    assert_eq!(item.name, "Unknown");
    assert_eq!(item.year, "N/A");
    assert_eq!(item.kind, "Game");
    assert_eq!(item.platforms, vec!["Nintendo Switch".to_string()]);
}

/// **VALUE**: Verifies the result cap and order preservation.
///
/// **BUG THIS CATCHES**: Would catch sorting (losing relevance order) or a missing cap
/// if IGDB ignores the limit clause.
#[test]
fn given_more_than_limit_records_when_normalized_then_truncated_in_order() {
    // GIVEN: 50 records
    let games: Vec<IgdbGame> = (1..=50)
        .map(|id| IgdbGame {
            id,
            name: Some(format!("Game {id}")),
            ..IgdbGame::default()
        })
        .collect();

    // WHEN: Normalizing
    let items = normalize_search_results(games);

    // THEN: First 35, in upstream order
    assert_eq!(items.len(), SEARCH_RESULT_LIMIT);
    assert_eq!(items.first().map(|i| i.id), Some(1));
    assert_eq!(items.last().map(|i| i.id), Some(35));
}

/// **VALUE**: Verifies the wire field name for the label is `type`.
#[test]
fn given_item_when_serialized_then_uses_type_key() {
    let item = SearchResultItem {
        id: 1,
        name: String::from("Zelda"),
        year: String::from("1986"),
        kind: String::from("Main Game"),
        platforms: vec![],
    };

    let json = serde_json::to_value(&item).unwrap();

    assert_eq!(json["type"], "Main Game");
    assert!(json.get("kind").is_none());
    assert_eq!(json["platforms"], serde_json::json!([]));
}

/// **VALUE**: Verifies the upstream body carries the exclusion filter and cap.
///
/// **WHY THIS MATTERS**: DLC, expansions, episodes and seasons flood search results
/// for popular franchises.
#[test]
fn given_query_when_body_built_then_excludes_categories_and_limits() {
    let body = search_query_body("zelda").unwrap();

    assert!(body.starts_with("search \"zelda\";"));
    assert!(body.contains("where category != (1,2,6,7);"));
    assert!(body.contains("limit 35;"));
    assert!(body.contains("platforms.name"));
    assert_eq!(EXCLUDED_CATEGORIES, [1, 2, 6, 7]);
}

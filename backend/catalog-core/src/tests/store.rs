// Unit tests for store lookup helpers

use crate::store::StoreLookupResult;
use crate::store::gog::normalize_title;

/// **VALUE**: Verifies title normalization used for exact matching.
///
/// **WHY THIS MATTERS**: GOG titles carry ™/® marks, colons and odd spacing that IGDB
/// names do not. Without normalization nearly nothing matches.
#[test]
fn given_decorated_titles_when_normalized_then_compare_equal() {
    assert_eq!(
        normalize_title("The Witcher® 3: Wild Hunt"),
        normalize_title("the witcher 3 wild hunt")
    );
    assert_eq!(normalize_title("DOOM™ Eternal"), "doometernal");
    assert_ne!(normalize_title("Doom"), normalize_title("Doom II"));
}

/// **VALUE**: Verifies the wire shape: `url` omitted when not found.
#[test]
fn given_lookup_results_when_serialized_then_url_only_when_found() {
    let found = serde_json::to_value(StoreLookupResult::found("https://www.gog.com/game/x")).unwrap();
    let missing = serde_json::to_value(StoreLookupResult::not_found()).unwrap();

    assert_eq!(found["found"], true);
    assert_eq!(found["url"], "https://www.gog.com/game/x");
    assert_eq!(missing, serde_json::json!({"found": false}));
}

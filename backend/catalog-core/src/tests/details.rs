// Unit tests for details normalization

use crate::details::{
    GameDetails, cover_url, details_query_body, developer_name, format_release_date,
    parse_game_id,
};
use crate::error::CatalogError;
use crate::igdb::IgdbGame;
use crate::igdb::models::{IgdbCompany, IgdbCover, IgdbInvolvedCompany, IgdbWebsite};

fn cover(url: &str) -> IgdbCover {
    IgdbCover {
        url: Some(url.to_string()),
    }
}

fn company(name: Option<&str>, developer: Option<bool>) -> IgdbInvolvedCompany {
    IgdbInvolvedCompany {
        developer,
        company: Some(IgdbCompany {
            name: name.map(String::from),
        }),
    }
}

/// **VALUE**: Verifies the thumbnail → big cover rewrite and the https prefix.
///
/// **WHY THIS MATTERS**: IGDB hands out 90px protocol-relative thumbnails. The detail
/// view (and the exported HTML, which opens from disk) needs a large absolute URL.
///
/// **BUG THIS CATCHES**: Would catch a `file://` relative URL in exported snapshots.
#[test]
fn given_protocol_relative_thumb_when_cover_normalized_then_big_https_url() {
    // GIVEN: IGDB's usual cover shape
    let raw = cover("//images.igdb.com/igdb/image/upload/t_thumb/co1r7f.jpg");

    // WHEN: Normalizing
    let url = cover_url(Some(&raw));

    // THEN: Big variant, absolute
    assert_eq!(
        url.as_deref(),
        Some("https://images.igdb.com/igdb/image/upload/t_cover_big/co1r7f.jpg")
    );
}

#[test]
fn given_absolute_cover_when_normalized_then_scheme_untouched() {
    let raw = cover("https://images.example/t_thumb/x.jpg");

    assert_eq!(
        cover_url(Some(&raw)).as_deref(),
        Some("https://images.example/t_cover_big/x.jpg")
    );
}

#[test]
fn given_protocol_relative_without_thumb_when_normalized_then_only_prefixed() {
    let raw = cover("//images.example/x.jpg");

    assert_eq!(
        cover_url(Some(&raw)).as_deref(),
        Some("https://images.example/x.jpg")
    );
}

#[test]
fn given_missing_or_empty_cover_when_normalized_then_none() {
    assert_eq!(cover_url(None), None);
    assert_eq!(cover_url(Some(&IgdbCover { url: None })), None);
    assert_eq!(cover_url(Some(&cover("  "))), None);
}

/// **VALUE**: Verifies the long date format and fallback.
///
/// **BUG THIS CATCHES**: Would catch zero-padded days ("March 03") or a locale-dependent
/// month name.
#[test]
fn given_timestamp_when_release_date_formatted_then_long_english_date() {
    // 2017-03-03T00:00:00Z
    assert_eq!(format_release_date(Some(1_488_499_200)), "March 3, 2017");
    // 1998-11-21T00:00:00Z, Ocarina of Time
    assert_eq!(format_release_date(Some(911_606_400)), "November 21, 1998");
    assert_eq!(format_release_date(None), "N/A");
}

/// **VALUE**: Verifies that the developer is the first flagged company with a name.
///
/// **WHY THIS MATTERS**: Publishers and porting studios are listed alongside the
/// developer; picking the first company blindly shows "Nintendo" for third-party games.
#[test]
fn given_mixed_companies_when_developer_picked_then_first_flagged_with_name() {
    // GIVEN: publisher, unnamed developer, real developer, second developer
    let companies = vec![
        company(Some("Nintendo"), Some(false)),
        company(None, Some(true)),
        company(Some("  "), Some(true)),
        company(Some("Monolith Soft"), Some(true)),
        company(Some("Other Dev"), Some(true)),
    ];

    // WHEN/THEN
    assert_eq!(developer_name(&companies), "Monolith Soft");
}

/// **VALUE**: Verifies "N/A" when no company is flagged developer.
#[test]
fn given_no_developer_flag_when_developer_picked_then_na() {
    let companies = vec![
        company(Some("Nintendo"), Some(false)),
        company(Some("Someone"), None),
    ];

    assert_eq!(developer_name(&companies), "N/A");
    assert_eq!(developer_name(&[]), "N/A");
}

/// **VALUE**: Verifies id validation.
///
/// **BUG THIS CATCHES**: Would catch `0`, negatives or trailing junk reaching IGDB.
#[test]
fn given_path_segments_when_parsed_then_only_positive_integers_accepted() {
    assert_eq!(parse_game_id("1942").unwrap(), 1942);

    for raw in ["0", "-5", "abc", "", "12x", "1.5", "99999999999999999999999"] {
        let err = parse_game_id(raw).unwrap_err();
        assert!(
            matches!(err, CatalogError::Validation { .. }),
            "'{raw}' should be a validation error"
        );
        assert_eq!(err.http_status(), 400);
    }
}

#[test]
fn given_id_when_details_body_built_then_filters_by_id_with_expanded_fields() {
    let body = details_query_body(1942).unwrap();

    assert!(body.contains("where id = 1942;"));
    assert!(body.contains("cover.url"));
    assert!(body.contains("involved_companies.developer"));
    assert!(body.contains("involved_companies.company.name"));
    assert!(body.contains("websites.category"));
    assert!(!body.contains("search"));
}

/// **VALUE**: Verifies a bare record still produces a fully-shaped GameDetails.
///
/// **WHY THIS MATTERS**: The detail view renders every field unconditionally.
#[test]
fn given_bare_record_when_normalized_then_all_fallbacks_applied() {
    let details = GameDetails::from(IgdbGame {
        id: 3,
        ..IgdbGame::default()
    });

    assert_eq!(details.name, "Unknown");
    assert_eq!(details.thumbnail_url, None);
    assert_eq!(details.release_date, "N/A");
    assert_eq!(details.developer, "N/A");
    assert!(details.platforms.is_empty());
    assert!(details.store_links.is_empty());
}

/// **VALUE**: Verifies camelCase wire names, and that a missing cover is `null`.
#[test]
fn given_details_when_serialized_then_camel_case_with_null_thumbnail() {
    let details = GameDetails::from(IgdbGame {
        id: 3,
        name: Some(String::from("Hades")),
        websites: vec![IgdbWebsite {
            url: Some(String::from("https://store.steampowered.com/app/1145360/Hades/")),
            category: Some(13),
        }],
        ..IgdbGame::default()
    });

    let json = serde_json::to_value(&details).unwrap();

    assert!(json["thumbnailUrl"].is_null());
    assert_eq!(json["releaseDate"], "N/A");
    assert_eq!(json["storeLinks"][0]["name"], "Steam");
    assert!(json.get("store_links").is_none());
}

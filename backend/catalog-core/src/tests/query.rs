// Unit tests for the Apicalypse query builder

use crate::error::CatalogError;
use crate::igdb::IgdbQueryBuilder;
use crate::igdb::query::escape_search_term;

/// **VALUE**: Verifies clause order and separators.
#[test]
fn given_all_clauses_when_built_then_search_fields_where_limit() {
    let body = IgdbQueryBuilder::default()
        .with_search("mario")
        .with_fields(["name", "category"])
        .with_filter("category != (1,2)")
        .with_filter("version_parent = null")
        .with_limit(10)
        .build()
        .unwrap();

    assert_eq!(
        body,
        "search \"mario\"; fields name, category; where category != (1,2) & version_parent = null; limit 10;"
    );
}

/// **VALUE**: Verifies that quotes in user input cannot break out of the search literal.
///
/// **WHY THIS MATTERS**: The search term is user input pasted into a query language.
/// An unescaped quote lets a user append arbitrary clauses (or just breaks the query).
///
/// **BUG THIS CATCHES**: Would catch removing the escaping step.
#[test]
fn given_quote_and_backslash_when_escaped_then_literal_stays_closed() {
    assert_eq!(escape_search_term(r#"say "hi""#), r#"say \"hi\""#);
    assert_eq!(escape_search_term(r"a\b"), r"a\\b");
    assert_eq!(escape_search_term("line\nbreak"), "line break");

    let body = IgdbQueryBuilder::default()
        .with_search(r#"x"; fields *; limit 500; search ""#)
        .with_fields(["name"])
        .build()
        .unwrap();

    assert!(body.starts_with(r#"search "x\"; fields *; limit 500; search \""; fields name;"#));
}

#[test]
fn given_no_fields_when_built_then_internal_error() {
    let result = IgdbQueryBuilder::default().with_limit(5).build();

    assert!(matches!(result, Err(CatalogError::Internal { .. })));
}

#[test]
fn given_out_of_range_limit_when_built_then_internal_error() {
    for limit in [0, 501] {
        let result = IgdbQueryBuilder::default()
            .with_fields(["name"])
            .with_limit(limit)
            .build();

        assert!(result.is_err(), "limit {limit} should be rejected");
    }
}

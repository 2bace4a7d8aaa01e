// Unit tests for the HTTP error boundary

use crate::error::{ApiError, ProxyError};

use catalog_core::error::{CatalogError, ConfigError};

use std::time::Duration;

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

async fn render(error: CatalogError) -> (StatusCode, Value) {
    let response = ApiError::from(error).into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// **VALUE**: Verifies each error kind renders with its status and an `error` field.
///
/// **WHY THIS MATTERS**: The browser branches on status (400 vs 404 vs 504) and shows
/// the `error` string. Both must stay stable.
///
/// **BUG THIS CATCHES**: Would catch a status mapping regression or a body without `error`.
#[tokio::test]
async fn given_catalog_errors_when_rendered_then_status_and_json_body() {
    let cases = [
        (CatalogError::validation("Game name is required"), 400),
        (CatalogError::not_found("Game not found: 1"), 404),
        (CatalogError::upstream(500, "boom"), 500),
        (CatalogError::auth("token rejected"), 503),
        (CatalogError::timeout(Duration::from_secs(15)), 504),
    ];

    for (error, expected) in cases {
        let (status, body) = render(error).await;
        assert_eq!(status.as_u16(), expected);
        assert!(body["error"].is_string(), "body should carry an error string");
    }
}

/// **VALUE**: Verifies internal detail never reaches the client.
///
/// **BUG THIS CATCHES**: Would catch the upstream body or source location leaking
/// into the response.
#[tokio::test]
async fn given_upstream_error_when_rendered_then_generic_message() {
    // GIVEN: An upstream error carrying a raw body
    let error = CatalogError::upstream(502, "<html>secret internals</html>");

    // WHEN: Rendering
    let (_, body) = render(error).await;

    // THEN: Only the generic message
    assert_eq!(body["error"], "Failed to fetch data from IGDB");
}

/// **VALUE**: Verifies validation messages are passed through verbatim.
#[tokio::test]
async fn given_validation_error_when_rendered_then_message_passed_through() {
    let (_, body) = render(CatalogError::validation("Game name is required")).await;

    assert_eq!(body["error"], "Game name is required");
}

/// **VALUE**: Verifies config errors convert into the startup error type.
#[test]
fn given_config_error_when_converted_then_proxy_error_keeps_message() {
    let err = ProxyError::from(ConfigError::missing_var("TWITCH_CLIENT_ID"));

    assert!(matches!(err, ProxyError::Core(_)));
    assert!(err.to_string().contains("TWITCH_CLIENT_ID"));
}

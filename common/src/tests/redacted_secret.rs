use crate::RedactedSecret;

/// **VALUE**: Verifies that Debug and Display never print the secret.
///
/// **WHY THIS MATTERS**: The client secret and bearer token live inside structs
/// that get logged with `{:?}`. A leak here puts Twitch credentials in log files.
///
/// **BUG THIS CATCHES**: Would catch a derived `Debug` replacing the manual impl.
#[test]
fn given_secret_when_formatted_then_value_is_hidden() {
    // GIVEN: A secret
    let secret = RedactedSecret::new("client_secret", "super-secret-value");

    // WHEN: Formatting both ways
    let debug = format!("{:?}", secret);
    let display = format!("{}", secret);

    // THEN: Value absent, label present
    assert!(!debug.contains("super-secret-value"));
    assert!(!display.contains("super-secret-value"));
    assert!(debug.contains("client_secret"));
    assert!(display.contains("REDACTED"));
}

/// **VALUE**: Verifies that serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Serialize)]` that would let a
/// token slip into a JSON response body.
#[test]
fn given_secret_when_serialized_then_fails() {
    // GIVEN: A secret
    let secret = RedactedSecret::new("access_token", "abc123");

    // WHEN: Serializing to JSON
    let result = serde_json::to_string(&secret);

    // THEN: Error, and the error text does not contain the value
    let err = result.expect_err("serialization must fail");
    assert!(!err.to_string().contains("abc123"));
}

#[test]
fn given_whitespace_secret_when_checked_then_is_empty() {
    assert!(RedactedSecret::new("client_id", "   ").is_empty());
    assert!(!RedactedSecret::new("client_id", "abc").is_empty());
    assert_eq!(RedactedSecret::new("client_id", "abc").expose(), "abc");
}

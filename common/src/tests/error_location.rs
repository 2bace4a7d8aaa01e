use crate::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` records the file of the call site.
///
/// **WHY THIS MATTERS**: Every error in the workspace prints its location. If the
/// file is wrong, the `[file:line:column]` suffix in log lines points nowhere useful.
///
/// **BUG THIS CATCHES**: Would catch if `Location::caller()` stops being forwarded
/// through `#[track_caller]` or the fields get swapped.
#[test]
#[track_caller]
fn given_location_caller_when_error_location_created_then_captures_this_file() {
    // GIVEN/WHEN: A location captured here
    let location = ErrorLocation::from(Location::caller());

    // THEN: File is this test file, line and column are set
    assert!(location.file.contains("error_location.rs"));
    assert!(location.line > 0);
    assert!(location.column > 0);
}

/// **VALUE**: Verifies the `[file:line:column]` Display format.
///
/// **WHY THIS MATTERS**: Log lines and error messages append this suffix; tooling
/// that jumps to source relies on the exact shape.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops brackets or a field.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_triple() {
    // GIVEN: A hand-built location
    let location = ErrorLocation {
        file: "src/token/mod.rs",
        line: 42,
        column: 7,
    };

    // WHEN: Formatting
    let formatted = location.to_string();

    // THEN: Exact bracketed format
    assert_eq!(formatted, "[src/token/mod.rs:42:7]");
}

/// **VALUE**: Verifies that two call sites produce two different lines.
///
/// **BUG THIS CATCHES**: Would catch a constructor that loses `#[track_caller]`,
/// making every error report the constructor's own line.
#[test]
fn given_two_call_sites_when_capturing_location_then_lines_differ() {
    // GIVEN: A helper that forwards the caller
    #[track_caller]
    fn capture() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    // WHEN: Capturing from consecutive lines
    let first = capture();
    let second = capture();

    // THEN: Same file, consecutive lines
    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line);
}

use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every failure a test handle reports is attributed to a call site.
/// If the captured position is wrong, a failing test points at the wrong line.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - File path extraction breaks
/// - Line/column capture fails
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN: Current caller location
    // WHEN: Creating ErrorLocation from caller
    let (expected_line, location) = (line!(), ErrorLocation::from(Location::caller()));

    // THEN: Should capture file, line, and column
    assert!(
        location.file.contains("error_location.rs"),
        "Should capture file path"
    );
    assert_eq!(location.line, expected_line, "Should capture correct line number");
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies that ErrorLocation Display formatting produces `[file:line:column]`.
///
/// **WHY THIS MATTERS**: Reported failures embed the location in their message. A broken
/// format makes the message unreadable in test output.
///
/// **BUG THIS CATCHES**: Would catch if the brackets or separators change.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: An ErrorLocation
    let location = ErrorLocation {
        file: "tests/fixture.rs",
        line: 42,
        column: 9,
    };

    // WHEN: Formatting as string
    let formatted = format!("{location}");

    // THEN: Should produce "[file:line:column]" format
    assert_eq!(formatted, "[tests/fixture.rs:42:9]");
}

/// **VALUE**: Verifies that `#[track_caller]` propagation attributes each call to its own line.
///
/// **WHY THIS MATTERS**: `NatsServer::start` relies on `#[track_caller]` to blame the test that
/// passed a bad port. Without propagation every failure would point inside the library.
///
/// **BUG THIS CATCHES**: Would catch if location propagation breaks in refactoring.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    // GIVEN: A helper function that captures location
    #[track_caller]
    fn capture_location() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    // WHEN: Capturing location from different call sites
    let loc1 = capture_location();
    let loc2 = capture_location();

    // THEN: Should have same file but sequential line numbers
    assert_eq!(loc1.file, loc2.file, "Should have same file");
    assert_eq!(loc1.line + 1, loc2.line, "Lines should be sequential");
}

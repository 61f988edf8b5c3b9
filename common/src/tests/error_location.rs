use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every error in the client carries an ErrorLocation. If capture
/// breaks, a failed purge points nowhere.
///
/// **BUG THIS CATCHES**: Would catch if file/line/column extraction stops being propagated.
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN/WHEN: Creating ErrorLocation from the current caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should carry a file and a non-zero position
    assert!(!location.file.is_empty(), "Should capture file path");
    assert!(location.line > 0, "Should capture line number");
    assert!(location.column > 0, "Should capture column number");
}

#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation {
        file: "src/v2/mod.rs",
        line: 42,
        column: 7,
    };

    assert_eq!(location.to_string(), "[src/v2/mod.rs:42:7]");
}

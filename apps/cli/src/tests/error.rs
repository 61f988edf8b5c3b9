// Unit tests for error module

use crate::error::CliError;

use ccu_client::CcuClientError;

/// **VALUE**: Library errors pass through with their own message and location.
///
/// **WHY THIS MATTERS**: The CLI prints the error as-is. A wrapper that re-labelled it
/// would hide which phase of the request failed.
///
/// **BUG THIS CATCHES**: Would catch if the `Client` variant stopped being transparent.
#[test]
fn given_client_error_when_converted_then_display_unchanged() {
    // GIVEN: A library error
    let inner = CcuClientError::transport("connection refused");
    let expected = inner.to_string();

    // WHEN: Converting into the CLI error
    let err = CliError::from(inner);

    // THEN: Formatting is identical
    assert_eq!(err.to_string(), expected);
    assert!(matches!(err, CliError::Client(_)));
}

#[test]
fn given_cli_error_when_formatted_then_includes_location() {
    let err = CliError::cli("Failed to format response");

    let error_string = err.to_string();

    assert!(error_string.contains("CLI Error: Failed to format response"));
    assert!(error_string.contains("error.rs"));
}

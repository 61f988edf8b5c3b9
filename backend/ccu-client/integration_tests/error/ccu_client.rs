use ccu_client::error::{CcuClientError, ConfigError};
use ccu_client::response::ApiResponse;

use common::ErrorLocation;

use std::error::Error;
use std::panic::Location;

/// **VALUE**: Errors built through the constructors point at the calling line.
///
/// **WHY THIS MATTERS**: A purge failing in a deployment pipeline needs to say which
/// call site failed, not just "Transport Error".
///
/// **BUG THIS CATCHES**: Would catch if someone:
/// - Removes `#[track_caller]` from a constructor
/// - Breaks the Display implementation to drop the location
#[test]
fn given_transport_error_when_formatted_then_includes_caller_location() {
    // GIVEN: A transport error built here
    let err = CcuClientError::transport("connection reset by peer");

    // WHEN: Formatting the error as string
    let error_string = err.to_string();

    // THEN: Should include error type, message, and this file
    assert!(error_string.contains("Transport Error"));
    assert!(error_string.contains("connection reset by peer"));
    assert!(error_string.contains("ccu_client.rs"));
}

#[test]
fn given_api_error_when_formatted_then_shows_title_and_detail() {
    let err = CcuClientError::api(ApiResponse {
        status_code: 403,
        title: String::from("Forbidden"),
        detail: String::from("You are not authorized to purge this CP code"),
        ..ApiResponse::default()
    });

    let error_string = err.to_string();

    assert!(error_string.contains("API Error: Forbidden: You are not authorized"));
    assert!(error_string.contains("ccu_client.rs"));
}

/// **VALUE**: Configuration failures keep their own location and message when wrapped.
///
/// **BUG THIS CATCHES**: Would catch if the `Config` variant stopped being transparent,
/// doubling the prefix or hiding the original location.
#[test]
fn given_wrapped_config_error_when_formatted_then_shows_inner_error() {
    let err: CcuClientError = ConfigError::MissingVariable {
        location: ErrorLocation::from(Location::caller()),
        names: vec![
            String::from("AKAMAI_CCU_USERNAME"),
            String::from("AKAMAI_CCU_PASSWORD"),
        ],
    }
    .into();

    let error_string = err.to_string();

    assert!(error_string.starts_with("Environment Variable Missing Error"));
    assert!(error_string.contains("AKAMAI_CCU_USERNAME, AKAMAI_CCU_PASSWORD"));
    assert_eq!(err.phase(), "configure");
}

#[test]
fn given_api_error_when_source_checked_then_none() {
    let err = CcuClientError::api(ApiResponse::default());

    assert!(err.source().is_none());
    assert!(err.to_string().contains("unknown"));
}

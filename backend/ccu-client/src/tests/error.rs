// Unit tests for CcuClientError classification helpers

use crate::error::{CcuClientError, ConfigError};
use crate::response::{ApiResponse, PartialResponse};

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use reqwest::header::HeaderMap;

fn api_error(status_code: u16) -> CcuClientError {
    CcuClientError::api(ApiResponse {
        status_code,
        title: String::from("Not Found"),
        ..ApiResponse::default()
    })
}

/// **VALUE**: Every variant reports the phase it failed in.
///
/// **WHY THIS MATTERS**: Callers decide on their own retry policy. Knowing whether a
/// failure happened before anything was sent is the first input to that decision.
#[test]
fn given_each_variant_when_phase_called_then_names_failing_phase() {
    let config = CcuClientError::from(ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("bad"),
    });

    assert_eq!(CcuClientError::encoding("x").phase(), "encode");
    assert_eq!(CcuClientError::request_construction("x").phase(), "construct");
    assert_eq!(CcuClientError::transport("x").phase(), "send");
    assert_eq!(CcuClientError::unauthorized().phase(), "authorize");
    assert_eq!(CcuClientError::decode("x", None).phase(), "decode");
    assert_eq!(api_error(400).phase(), "classify");
    assert_eq!(config.phase(), "configure");
}

#[test]
fn given_404_api_error_when_is_not_found_checked_then_true() {
    assert!(api_error(404).is_not_found());
    assert!(!api_error(400).is_not_found());
    assert!(!CcuClientError::transport("connection reset").is_not_found());
}

#[test]
fn given_unauthorized_error_when_status_code_checked_then_401() {
    assert_eq!(CcuClientError::unauthorized().status_code(), Some(401));
}

#[test]
fn given_decode_error_with_partial_response_when_status_code_checked_then_uses_it() {
    let err = CcuClientError::decode(
        "bad json",
        Some(PartialResponse {
            status: HttpStatusCode(502),
            headers: HeaderMap::new(),
            body: String::from("<html>Bad Gateway</html>"),
        }),
    );

    assert_eq!(err.status_code(), Some(502));
}

#[test]
fn given_transport_errors_when_is_retryable_checked_then_cancellation_is_final() {
    assert!(CcuClientError::deadline_exceeded().is_retryable());
    assert!(!CcuClientError::cancelled().is_retryable());
    assert!(api_error(503).is_retryable());
    assert!(!api_error(400).is_retryable());
}

#[test]
fn given_error_when_formatted_then_includes_location() {
    let err = CcuClientError::encoding("cannot encode");

    let message = err.to_string();

    assert!(message.contains("Encoding Error: cannot encode"));
    assert!(message.contains("error.rs"));
}

#[test]
fn given_bad_url_when_converted_then_request_construction_error() {
    let parse_error = url::Url::parse("not a url").unwrap_err();

    let err = CcuClientError::from(parse_error);

    assert!(matches!(err, CcuClientError::RequestConstruction { .. }));
}

use crate::HttpStatusCode;

/// **VALUE**: Pins the success window at exactly [200, 299].
///
/// **WHY THIS MATTERS**: The purge API embeds its own `httpStatus` in every body and the
/// client turns anything outside the 2xx window into an error. An off-by-one here would
/// either swallow a failed purge or reject an accepted one (201).
///
/// **BUG THIS CATCHES**: Half-open vs closed range mistakes at either boundary.
#[test]
fn given_boundary_codes_when_is_success_checked_then_only_2xx_pass() {
    assert!(!HttpStatusCode(199).is_success());
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(201).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(300).is_success());
}

#[test]
fn given_transient_codes_when_is_retryable_checked_then_true() {
    for code in [429, 502, 503, 504] {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should be retryable");
    }
    assert!(!HttpStatusCode(400).is_retryable());
    assert!(!HttpStatusCode(500).is_retryable());
}

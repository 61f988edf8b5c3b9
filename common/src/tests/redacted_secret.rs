use crate::RedactedSecret;

/// **VALUE**: Ensures secrets never appear in Debug or Display output.
///
/// **WHY THIS MATTERS**: Clients and configs derive Debug and get logged. The basic-auth
/// password and EdgeGrid client secret must not leak into log files.
///
/// **BUG THIS CATCHES**: Would catch if someone swaps the manual Debug impl for a derive.
#[test]
fn given_secret_when_formatted_then_value_is_redacted() {
    let secret = RedactedSecret::new("hunter2-very-secret");

    let debug = format!("{:?}", secret);
    let display = format!("{}", secret);

    assert!(!debug.contains("hunter2"));
    assert!(!display.contains("hunter2"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn given_secret_when_exposed_then_returns_original_value() {
    let secret = RedactedSecret::from(String::from("abc123"));

    assert_eq!(secret.expose(), "abc123");
    assert_eq!(secret.len(), 6);
    assert!(!secret.is_empty());
}

/// **VALUE**: Ensures a secret cannot be serialized by accident.
///
/// **BUG THIS CATCHES**: Would catch if the custom Serialize impl is replaced by a derive,
/// which would write the raw secret into any JSON dump of a config.
#[test]
fn given_secret_when_serialized_then_fails() {
    let secret = RedactedSecret::new("do-not-serialize");

    let result = serde_json::to_string(&secret);

    assert!(result.is_err());
    assert!(!result.unwrap_err().to_string().contains("do-not-serialize"));
}

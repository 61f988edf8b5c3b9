// Unit tests for EdgeGridConfig loading from .edgerc files and the environment
// Env-mutating tests are serialized

use crate::config::{DEFAULT_MAX_BODY, EdgeGridConfig};
use crate::error::ConfigError;

use std::io::Write;
use std::path::Path;

use serial_test::serial;
use tempfile::NamedTempFile;

const EDGERC: &str = "\
[default]
host = https://akab-default.luna.akamaiapis.net/
client_token = akab-client-default
client_secret = secret-default
access_token = akab-access-default

[ccu]
host = akab-ccu.luna.akamaiapis.net
client_token = akab-client-ccu
client_secret = secret-ccu
access_token = akab-access-ccu
max_body = 2048

[broken]
host = akab-broken.luna.akamaiapis.net
client_token = akab-client-broken
";

const ENV_KEYS: &[&str] = &[
    "AKAMAI_HOST",
    "AKAMAI_CLIENT_TOKEN",
    "AKAMAI_CLIENT_SECRET",
    "AKAMAI_ACCESS_TOKEN",
    "AKAMAI_MAX_BODY",
    "AKAMAI_CCU_HOST",
    "AKAMAI_CCU_CLIENT_TOKEN",
    "AKAMAI_CCU_CLIENT_SECRET",
    "AKAMAI_CCU_ACCESS_TOKEN",
];

fn edgerc_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(EDGERC.as_bytes()).unwrap();
    file
}

fn clear_env() {
    for key in ENV_KEYS {
        // SAFETY: env-mutating tests run under #[serial]
        unsafe { std::env::remove_var(key) };
    }
}

fn set_env(key: &str, value: &str) {
    // SAFETY: env-mutating tests run under #[serial]
    unsafe { std::env::set_var(key, value) };
}

#[test]
fn given_default_section_when_loaded_from_edgerc_then_host_is_normalized() {
    let file = edgerc_file();

    let config = EdgeGridConfig::from_edgerc(file.path(), "default").unwrap();

    assert_eq!(config.host, "akab-default.luna.akamaiapis.net");
    assert_eq!(config.client_token, "akab-client-default");
    assert_eq!(config.client_secret.expose(), "secret-default");
    assert_eq!(config.access_token.expose(), "akab-access-default");
    assert_eq!(config.max_body, DEFAULT_MAX_BODY);
    assert_eq!(
        config.base_url().unwrap().as_str(),
        "https://akab-default.luna.akamaiapis.net/"
    );
}

#[test]
fn given_named_section_with_max_body_when_loaded_then_uses_it() {
    let file = edgerc_file();

    let config = EdgeGridConfig::from_edgerc(file.path(), "ccu").unwrap();

    assert_eq!(config.host, "akab-ccu.luna.akamaiapis.net");
    assert_eq!(config.max_body, 2048);
}

/// **VALUE**: Verifies a section missing required keys fails with the key's name.
///
/// **BUG THIS CATCHES**: Would catch if a missing secret became an empty string and the
/// client went on to sign every request with an empty key.
#[test]
fn given_section_missing_secret_when_loaded_then_missing_key_error() {
    let file = edgerc_file();

    let err = EdgeGridConfig::from_edgerc(file.path(), "broken").unwrap_err();

    match err {
        ConfigError::MissingKey { key, .. } => assert_eq!(key, "client_secret"),
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

#[test]
fn given_unknown_section_when_loaded_then_missing_section_error() {
    let file = edgerc_file();

    let err = EdgeGridConfig::from_edgerc(file.path(), "staging").unwrap_err();

    assert!(matches!(err, ConfigError::MissingSection { .. }));
}

#[test]
fn given_nonexistent_file_when_loaded_then_read_error() {
    let err = EdgeGridConfig::from_edgerc(Path::new("/nonexistent/.edgerc"), "default")
        .unwrap_err();

    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn given_bad_max_body_when_loaded_then_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        b"[default]\nhost = h.example.net\nclient_token = c\nclient_secret = s\naccess_token = a\nmax_body = lots\n",
    )
    .unwrap();

    let err = EdgeGridConfig::from_edgerc(file.path(), "default").unwrap_err();

    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn given_host_with_path_when_validated_then_rejected() {
    let config = EdgeGridConfig::new("host.example.net/extra", "c", "s", "a");

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

/// **VALUE**: Validation errors point at the line that asked for validation.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` missing from `validate` or
/// `base_url`, which pins every reported location inside config/mod.rs.
#[test]
fn given_invalid_config_when_checked_then_error_location_is_the_caller() {
    let config = EdgeGridConfig::new("bad host", "c", "s", "a");

    let validate_line = line!() + 1;
    let validate_err = config.validate().expect_err("Whitespace host should fail");
    let base_url_line = line!() + 1;
    let base_url_err = config.base_url().expect_err("Whitespace host should not parse");

    for (err, line) in [(validate_err, validate_line), (base_url_err, base_url_line)] {
        match err {
            ConfigError::ValidationError { location, .. } => {
                assert!(location.file.contains("tests"), "got {}", location.file);
                assert_eq!(location.line, line);
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies environment variables take precedence over the file.
///
/// **WHY THIS MATTERS**: CI systems inject credentials through the environment while
/// developer machines keep a `.edgerc`. The environment must win when both exist.
#[test]
#[serial]
fn given_env_host_set_when_load_called_then_env_wins_over_file() {
    clear_env();
    set_env("AKAMAI_HOST", "akab-env.luna.akamaiapis.net");
    set_env("AKAMAI_CLIENT_TOKEN", "akab-client-env");
    set_env("AKAMAI_CLIENT_SECRET", "secret-env");
    set_env("AKAMAI_ACCESS_TOKEN", "akab-access-env");
    set_env("AKAMAI_MAX_BODY", "4096");
    let file = edgerc_file();

    let config = EdgeGridConfig::load(Some(file.path()), None).unwrap();
    clear_env();

    assert_eq!(config.host, "akab-env.luna.akamaiapis.net");
    assert_eq!(config.client_token, "akab-client-env");
    assert_eq!(config.max_body, 4096);
}

#[test]
#[serial]
fn given_named_section_env_when_load_called_then_uses_section_prefix() {
    clear_env();
    set_env("AKAMAI_CCU_HOST", "akab-ccu-env.luna.akamaiapis.net");
    set_env("AKAMAI_CCU_CLIENT_TOKEN", "akab-client-ccu-env");
    set_env("AKAMAI_CCU_CLIENT_SECRET", "secret-ccu-env");
    set_env("AKAMAI_CCU_ACCESS_TOKEN", "akab-access-ccu-env");
    let file = edgerc_file();

    let config = EdgeGridConfig::load(Some(file.path()), Some("CCU")).unwrap();
    clear_env();

    assert_eq!(config.host, "akab-ccu-env.luna.akamaiapis.net");
    assert_eq!(config.max_body, DEFAULT_MAX_BODY);
}

#[test]
#[serial]
fn given_partial_env_when_load_called_then_missing_key_error() {
    clear_env();
    set_env("AKAMAI_HOST", "akab-env.luna.akamaiapis.net");
    set_env("AKAMAI_CLIENT_TOKEN", "akab-client-env");

    let result = EdgeGridConfig::load(None, None);
    clear_env();

    match result {
        Err(ConfigError::MissingKey { key, .. }) => assert_eq!(key, "AKAMAI_CLIENT_SECRET"),
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

#[test]
#[serial]
fn given_no_env_when_load_called_then_reads_edgerc_section() {
    clear_env();
    let file = edgerc_file();

    let config = EdgeGridConfig::load(Some(file.path()), Some("ccu")).unwrap();

    assert_eq!(config.client_token, "akab-client-ccu");
}

use ccu_client::config::EdgeGridConfig;
use ccu_client::error::ConfigError;

use std::error::Error;
use std::io::Write;

use tempfile::NamedTempFile;

/// **VALUE**: A malformed `.edgerc` names the file and offending line.
///
/// **WHY THIS MATTERS**: Credentials files are edited by hand; "parse error" alone
/// sends users hunting through every line.
#[test]
fn given_malformed_edgerc_when_loaded_then_parse_error_names_file_and_line() {
    // GIVEN: A file with a key outside any section
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"host = akab.luna.akamaiapis.net\n")
        .expect("Failed to write temp file");

    // WHEN: Loading the default section
    let err = EdgeGridConfig::from_edgerc(file.path(), "default")
        .expect_err("Key outside section should fail");

    // THEN: The message names the file and the line
    let error_string = err.to_string();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(error_string.contains("line 1"));
    assert!(error_string.contains(&file.path().display().to_string()));
}

#[test]
fn given_unreadable_edgerc_when_loaded_then_read_error_keeps_io_source() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let err = EdgeGridConfig::from_edgerc(&dir.path().join("absent"), "default")
        .expect_err("Missing file should fail");

    assert!(matches!(err, ConfigError::ReadError { .. }));
    assert!(err.source().is_some());
}

use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

/// Failures while loading credentials or the EdgeGrid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Section Not Found Error: [{section}] in {path} {location}")]
    MissingSection {
        location: ErrorLocation,
        path: PathBuf,
        section: String,
    },

    #[error("Config Missing Key Error: '{key}' in {origin} {location}")]
    MissingKey {
        location: ErrorLocation,
        origin: String,
        key: String,
    },

    #[error("Environment Variable Missing Error: {} {location}", .names.join(", "))]
    MissingVariable {
        location: ErrorLocation,
        names: Vec<String>,
    },

    #[error("Environment Variable Invalid Error: {name}: {reason} {location}")]
    InvalidVariable {
        location: ErrorLocation,
        name: String,
        reason: String,
    },

    #[error("Config Path Detection Error: {reason} {location}")]
    PathDetection {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },
}

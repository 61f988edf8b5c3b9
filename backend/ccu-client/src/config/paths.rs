//! Location of the `.edgerc` credentials file.
//!
//! Lookup order:
//! 1. Explicit path from the caller (a leading `~` is expanded)
//! 2. EDGERC environment variable
//! 3. `.edgerc` in the home directory via the `dirs` crate
//!
//! Returns Result, never silently falls back to a wrong path.

use crate::credentials::env::read_var;
use crate::error::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info};

pub const EDGERC_ENV: &str = "EDGERC";
pub const EDGERC_FILE_NAME: &str = ".edgerc";

/// How the path was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// Passed in by the caller.
    Explicit,
    /// Set via the EDGERC environment variable.
    EnvVar,
    /// `~/.edgerc`.
    HomeDirectory,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::Explicit => write!(f, "explicit path"),
            PathSource::EnvVar => write!(f, "EDGERC"),
            PathSource::HomeDirectory => write!(f, "home directory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EdgeRcPath {
    pub path: PathBuf,
    pub source: PathSource,
}

/// Resolve which `.edgerc` to read.
///
/// # Errors
/// Returns `ConfigError::PathDetection` if no explicit path is given, EDGERC
/// is unset and the home directory cannot be determined.
#[track_caller]
pub fn detect_edgerc_path(explicit: Option<&Path>) -> Result<EdgeRcPath, ConfigError> {
    if let Some(path) = explicit {
        let path = expand_home(path);
        debug!("Using explicit .edgerc path: {:?}", path);
        return Ok(EdgeRcPath {
            path,
            source: PathSource::Explicit,
        });
    }

    if let Some(custom) = read_var(EDGERC_ENV)? {
        let path = expand_home(Path::new(&custom));
        info!("Using EDGERC override: {:?}", path);
        return Ok(EdgeRcPath {
            path,
            source: PathSource::EnvVar,
        });
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(EdgeRcPath {
            path: home.join(EDGERC_FILE_NAME),
            source: PathSource::HomeDirectory,
        });
    }

    Err(ConfigError::PathDetection {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("Cannot determine home directory. Set the EDGERC environment variable."),
    })
}

/// Expand a leading `~` to the home directory. Other paths pass through.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

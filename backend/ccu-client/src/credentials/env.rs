//! `.env` discovery and environment variable access.
//!
//! A `.env` file is optional. Variables already present in the process
//! environment take precedence over the file (dotenvy never overrides).

use crate::error::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;

use log::{debug, info, warn};

/// Attempts to load `.env` from the current directory, then from the
/// executable's directory.
pub fn try_load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return;
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let env_path = exe_dir.join(".env");
            if env_path.exists() {
                match dotenvy::from_path(&env_path) {
                    Ok(_) => {
                        info!("Loaded .env from: {:?}", env_path);
                        return;
                    }
                    Err(e) => {
                        warn!("Failed to parse .env at {:?}: {}", env_path, e);
                    }
                }
            }
        }
    }

    debug!("No .env file found - using process environment only");
}

/// Read `name`, treating an empty value the same as an absent one.
#[track_caller]
pub fn read_var(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidVariable {
            location: ErrorLocation::from(Location::caller()),
            name: name.to_string(),
            reason: String::from("contains invalid unicode"),
        }),
    }
}

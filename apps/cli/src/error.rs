use ccu_client::CcuClientError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Errors surfaced by the `ccu` binary.
///
/// Library failures are wrapped unchanged so their own location and phase
/// survive; everything the CLI itself gets wrong is a `Cli` error.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from this App
    #[error("CLI Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    /// Error from a purge API call
    #[error(transparent)]
    Client(#[from] CcuClientError),
}

impl CliError {
    #[track_caller]
    pub fn cli(message: impl Into<String>) -> Self {
        CliError::Cli {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

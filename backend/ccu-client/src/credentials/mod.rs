//! Credential sources.
//!
//! v2 authenticates with HTTP Basic using a username/password pair read from
//! `AKAMAI_CCU_USERNAME` / `AKAMAI_CCU_PASSWORD`. v3 credentials live in
//! [`crate::config::EdgeGridConfig`].

pub mod env;

use crate::error::ConfigError;

use common::{ErrorLocation, RedactedSecret};

use std::panic::Location;

use log::info;

pub const USERNAME_ENV: &str = "AKAMAI_CCU_USERNAME";
pub const PASSWORD_ENV: &str = "AKAMAI_CCU_PASSWORD";

/// HTTP Basic credentials for the v2 API.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: RedactedSecret,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: RedactedSecret::new(password),
        }
    }

    /// Load from `.env` (if present) and the process environment.
    ///
    /// # Errors
    /// [`ConfigError::MissingVariable`] naming every variable that is unset or
    /// empty; [`ConfigError::InvalidVariable`] for non-unicode values.
    #[track_caller]
    pub fn from_env() -> Result<Self, ConfigError> {
        env::try_load_dotenv();
        Self::from_process_env()
    }

    /// Like [`BasicCredentials::from_env`] without looking for a `.env` file.
    #[track_caller]
    pub fn from_process_env() -> Result<Self, ConfigError> {
        let username = env::read_var(USERNAME_ENV)?;
        let password = env::read_var(PASSWORD_ENV)?;

        match (username, password) {
            (Some(username), Some(password)) => {
                info!(
                    "Loaded CCU v2 credentials for '{}' from {} ({} char password)",
                    username,
                    USERNAME_ENV,
                    password.len()
                );
                Ok(Self::new(username, password))
            }
            (username, password) => {
                let mut names = Vec::new();
                if username.is_none() {
                    names.push(USERNAME_ENV.to_string());
                }
                if password.is_none() {
                    names.push(PASSWORD_ENV.to_string());
                }
                Err(ConfigError::MissingVariable {
                    location: ErrorLocation::from(Location::caller()),
                    names,
                })
            }
        }
    }
}

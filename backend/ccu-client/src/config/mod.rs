//! EdgeGrid signing configuration for the v3 API.
//!
//! Resolution mirrors the vendor tooling: environment variables win when the
//! section's HOST variable is present, otherwise the `.edgerc` file is read.

pub mod edgerc;
pub mod paths;

pub use edgerc::EdgeRc;

use crate::credentials::env::{read_var, try_load_dotenv};
use crate::error::ConfigError;

use common::{ErrorLocation, RedactedSecret};

use std::panic::Location;
use std::path::Path;

use log::{debug, info};
use url::Url;

pub const DEFAULT_SECTION: &str = "default";
pub const DEFAULT_MAX_BODY: usize = 131_072;

const ENV_PREFIX: &str = "AKAMAI";
const ENV_ORIGIN: &str = "environment";

/// Credentials and endpoint used to sign v3 requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeGridConfig {
    /// API hostname, without scheme or trailing slash.
    pub host: String,
    pub client_token: String,
    pub client_secret: RedactedSecret,
    pub access_token: RedactedSecret,
    /// Only this many leading body bytes are hashed into the signature.
    pub max_body: usize,
}

impl EdgeGridConfig {
    pub fn new(
        host: impl Into<String>,
        client_token: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            host: normalize_host(&host.into()),
            client_token: client_token.into(),
            client_secret: RedactedSecret::new(client_secret),
            access_token: RedactedSecret::new(access_token),
            max_body: DEFAULT_MAX_BODY,
        }
    }

    pub fn with_max_body(mut self, max_body: usize) -> Self {
        self.max_body = max_body;
        self
    }

    /// Load the configuration for `section` (default `"default"`).
    ///
    /// Environment variables `AKAMAI_{SECTION}_HOST`, `..._CLIENT_TOKEN`,
    /// `..._CLIENT_SECRET`, `..._ACCESS_TOKEN` and optional `..._MAX_BODY`
    /// take precedence (the `{SECTION}_` infix is dropped for the default
    /// section). Without them, `path` (default `~/.edgerc`) is parsed.
    ///
    /// # Errors
    /// Any [`ConfigError`] from path detection, reading, parsing or validation.
    #[track_caller]
    pub fn load(path: Option<&Path>, section: Option<&str>) -> Result<Self, ConfigError> {
        let section = section
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SECTION)
            .to_lowercase();

        try_load_dotenv();

        if let Some(config) = Self::from_env(&section)? {
            info!("EdgeGrid config for [{section}] loaded from environment");
            return Ok(config);
        }

        let edgerc = paths::detect_edgerc_path(path)?;
        debug!(
            "Reading EdgeGrid config from {:?} (source: {})",
            edgerc.path, edgerc.source
        );
        Self::from_edgerc(&edgerc.path, &section)
    }

    /// Read the configuration from environment variables.
    ///
    /// Returns `Ok(None)` when the section's HOST variable is not set.
    #[track_caller]
    pub fn from_env(section: &str) -> Result<Option<Self>, ConfigError> {
        let location = ErrorLocation::from(Location::caller());
        let prefix = env_prefix(section);
        let var = |key: &str| format!("{prefix}{key}");

        let Some(host) = read_var(&var("HOST"))? else {
            return Ok(None);
        };

        let required = |key: &str| -> Result<String, ConfigError> {
            let name = var(key);
            read_var(&name)?.ok_or_else(|| ConfigError::MissingKey {
                location,
                origin: ENV_ORIGIN.to_string(),
                key: name,
            })
        };

        let config = Self::new(
            host,
            required("CLIENT_TOKEN")?,
            required("CLIENT_SECRET")?,
            required("ACCESS_TOKEN")?,
        );

        let max_body_var = var("MAX_BODY");
        let config = match read_var(&max_body_var)? {
            Some(raw) => config.with_max_body(parse_max_body(&raw).map_err(|reason| {
                ConfigError::InvalidVariable {
                    location,
                    name: max_body_var.clone(),
                    reason,
                }
            })?),
            None => config,
        };

        config.validate()?;
        Ok(Some(config))
    }

    /// Read `section` from the `.edgerc` file at `path`.
    #[track_caller]
    pub fn from_edgerc(path: &Path, section: &str) -> Result<Self, ConfigError> {
        let location = ErrorLocation::from(Location::caller());
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location,
            path: path.to_path_buf(),
            source: e,
        })?;

        let edgerc = EdgeRc::parse(&contents).map_err(|reason| ConfigError::ParseError {
            location,
            path: path.to_path_buf(),
            reason,
        })?;

        let values = edgerc
            .section(section)
            .ok_or_else(|| ConfigError::MissingSection {
                location,
                path: path.to_path_buf(),
                section: section.to_string(),
            })?;

        let origin = format!("{}[{}]", path.display(), section);
        let required = |key: &str| -> Result<String, ConfigError> {
            values
                .get(key)
                .filter(|value| !value.is_empty())
                .cloned()
                .ok_or_else(|| ConfigError::MissingKey {
                    location,
                    origin: origin.clone(),
                    key: key.to_string(),
                })
        };

        let config = Self::new(
            required("host")?,
            required("client_token")?,
            required("client_secret")?,
            required("access_token")?,
        );

        let config = match values.get("max_body") {
            Some(raw) => config.with_max_body(parse_max_body(raw).map_err(|reason| {
                ConfigError::ParseError {
                    location,
                    path: path.to_path_buf(),
                    reason: format!("max_body: {reason}"),
                }
            })?),
            None => config,
        };

        config.validate()?;
        info!(
            "EdgeGrid config for [{}] loaded from {}",
            section,
            path.display()
        );
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any credential is empty or
    /// the host is not a bare hostname.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let empty = [
            ("host", self.host.is_empty()),
            ("client_token", self.client_token.is_empty()),
            ("client_secret", self.client_secret.is_empty()),
            ("access_token", self.access_token.is_empty()),
        ];
        if let Some((name, _)) = empty.iter().find(|(_, is_empty)| *is_empty) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("{name} cannot be empty"),
            });
        }

        if self.host.contains('/') || self.host.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid host: {}", self.host),
            });
        }

        Ok(())
    }

    /// `https://{host}/`, the root every v3 path is joined onto.
    #[track_caller]
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let location = ErrorLocation::from(Location::caller());
        Url::parse(&format!("https://{}/", self.host)).map_err(|e| ConfigError::ValidationError {
            location,
            reason: format!("Invalid host '{}': {e}", self.host),
        })
    }
}

fn env_prefix(section: &str) -> String {
    if section.eq_ignore_ascii_case(DEFAULT_SECTION) {
        format!("{ENV_PREFIX}_")
    } else {
        format!("{ENV_PREFIX}_{}_", section.to_uppercase())
    }
}

fn normalize_host(raw: &str) -> String {
    let host = raw.trim();
    let host = host.strip_prefix("https://").unwrap_or(host);
    host.trim_end_matches('/').to_string()
}

fn parse_max_body(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| format!("'{raw}' is not a byte count: {e}"))
}

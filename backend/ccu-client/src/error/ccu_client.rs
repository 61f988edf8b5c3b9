//! Error taxonomy for purge API calls.
//!
//! Each variant names the phase that failed:
//! - `Encoding`: the request payload could not be serialized
//! - `RequestConstruction`: the URL or request object could not be built
//! - `Transport`: network failure, cancelled context or expired deadline
//! - `Unauthorized`: raw HTTP 401 (v2 only, checked before decoding)
//! - `Decode`: the body was not the expected JSON
//! - `Api`: the decoded body reported a status outside [200, 299]
//!
//! All variants carry an ErrorLocation captured via `#[track_caller]`.

use crate::error::config::ConfigError;
use crate::response::{ApiResponse, PartialResponse};

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CcuClientError {
    #[error("Encoding Error: {message} {location}")]
    Encoding {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request Construction Error: {message} {location}")]
    RequestConstruction {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        is_cancelled: bool,
        location: ErrorLocation,
    },

    #[error("Unauthorized Error: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        /// Status, headers and raw body of the reply. Populated by the v3 client only.
        response: Option<PartialResponse>,
        location: ErrorLocation,
    },

    #[error("API Error: {response} {location}")]
    Api {
        response: ApiResponse,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CcuClientError {
    #[track_caller]
    pub fn encoding(message: impl Into<String>) -> Self {
        CcuClientError::Encoding {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn request_construction(message: impl Into<String>) -> Self {
        CcuClientError::RequestConstruction {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        CcuClientError::Transport {
            message: message.into(),
            is_timeout: false,
            is_connection: false,
            is_cancelled: false,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn cancelled() -> Self {
        CcuClientError::Transport {
            message: String::from("request context cancelled"),
            is_timeout: false,
            is_connection: false,
            is_cancelled: true,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn deadline_exceeded() -> Self {
        CcuClientError::Transport {
            message: String::from("request context deadline exceeded"),
            is_timeout: true,
            is_connection: false,
            is_cancelled: false,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized() -> Self {
        CcuClientError::Unauthorized {
            message: String::from("unauthorized"),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>, response: Option<PartialResponse>) -> Self {
        CcuClientError::Decode {
            message: message.into(),
            response,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api(response: ApiResponse) -> Self {
        CcuClientError::Api {
            response,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_builder() {
            return CcuClientError::RequestConstruction {
                message: format!("error creating HTTP request: {error}"),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        CcuClientError::Transport {
            message: format!("error sending HTTP request: {error}"),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            is_cancelled: false,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Which phase of the exchange produced this error.
    pub fn phase(&self) -> &'static str {
        match self {
            CcuClientError::Encoding { .. } => "encode",
            CcuClientError::RequestConstruction { .. } => "construct",
            CcuClientError::Transport { .. } => "send",
            CcuClientError::Unauthorized { .. } => "authorize",
            CcuClientError::Decode { .. } => "decode",
            CcuClientError::Api { .. } => "classify",
            CcuClientError::Config(_) => "configure",
        }
    }

    /// The decoded API reply, when the server answered with a non-2xx `httpStatus`.
    pub fn api_response(&self) -> Option<&ApiResponse> {
        match self {
            CcuClientError::Api { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Best known HTTP status for this error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CcuClientError::Api { response, .. } => Some(response.status_code),
            CcuClientError::Unauthorized { .. } => Some(HttpStatusCode::UNAUTHORIZED.0),
            CcuClientError::Decode {
                response: Some(partial),
                ..
            } => Some(partial.status.0),
            _ => None,
        }
    }

    /// The server did not recognise the requested purge id or queue.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(HttpStatusCode::NOT_FOUND.0)
    }

    /// Hint for callers implementing their own retry policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            CcuClientError::Transport {
                is_timeout,
                is_connection,
                is_cancelled,
                ..
            } => (*is_timeout || *is_connection) && !*is_cancelled,
            CcuClientError::Api { response, .. } => response.status().is_retryable(),
            _ => false,
        }
    }
}

impl From<url::ParseError> for CcuClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        CcuClientError::RequestConstruction {
            message: format!("invalid request URL: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for CcuClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        CcuClientError::from_reqwest(&error)
    }
}

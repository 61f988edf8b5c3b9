//! Fields common to every purge API reply, and the success check applied to
//! all of them.

use crate::error::CcuClientError;

use common::HttpStatusCode;

use std::fmt;

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// The envelope present on every API reply.
///
/// When `status_code` falls outside [200, 299] the whole value becomes the
/// error returned to the caller (see [`ensure_success`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiResponse {
    /// Identifier to hand to vendor support if something goes wrong.
    pub support_id: String,

    /// Application-level status, reported inside the body.
    #[serde(rename = "httpStatus")]
    pub status_code: u16,

    pub title: String,

    pub detail: String,

    /// Link to the machine readable documentation for this reply.
    pub described_by: String,
}

impl ApiResponse {
    pub fn status(&self) -> HttpStatusCode {
        HttpStatusCode(self.status_code)
    }

    pub fn is_success(&self) -> bool {
        self.status().is_success()
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            return write!(f, "unknown");
        }
        if self.detail.is_empty() {
            return write!(f, "{}", self.title);
        }
        write!(f, "{}: {}", self.title, self.detail)
    }
}

impl std::error::Error for ApiResponse {}

/// Surface `response` as an [`CcuClientError::Api`] unless its status is 2xx.
#[track_caller]
pub fn ensure_success(response: &ApiResponse) -> Result<(), CcuClientError> {
    if response.is_success() {
        return Ok(());
    }
    Err(CcuClientError::api(response.clone()))
}

/// What was received before a v3 body failed to decode.
#[derive(Debug, Clone)]
pub struct PartialResponse {
    pub status: HttpStatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

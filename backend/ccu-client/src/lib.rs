//! Client library for the CCU content-purge API.
//!
//! Two independent clients live here:
//! - [`v2::CcuV2Client`]: queue-based purges with HTTP Basic auth; queue
//!   length, purge submission and purge status.
//! - [`v3::CcuV3Client`]: Fast Purge with EdgeGrid request signing; purge
//!   submission only.
//!
//! Both send JSON through an injected `reqwest::Client`, decode the JSON
//! reply and turn any embedded `httpStatus` outside 2xx into
//! [`error::CcuClientError::Api`]. Nothing is retried.

pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod response;
pub mod v2;
pub mod v3;

mod transport;
#[cfg(test)]
mod tests;

pub use config::EdgeGridConfig;
pub use context::{CancelHandle, RequestContext};
pub use credentials::BasicCredentials;
pub use error::{CcuClientError, ConfigError};
pub use response::{ApiResponse, PartialResponse, ensure_success};

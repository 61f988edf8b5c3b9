//! Shared primitives for the CCU workspace.
//!
//! This crate holds the small building blocks every other crate leans on:
//! source-location tracking for errors, a redacting wrapper for credentials,
//! and HTTP status classification.
//!
//! ## Architecture
//!
//! - **common** (this crate): Location tracking, secrets, status codes
//! - **ccu-client**: The v2 and v3 purge API clients
//! - **ccu**: Command-line front end wiring logging and credentials together

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;

#[cfg(test)]
mod tests;

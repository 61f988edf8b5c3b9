//! EdgeGrid (EG1-HMAC-SHA256) request signing.
//!
//! The signature covers method, scheme, host, path and query, and a hash of
//! at most `max_body` bytes of a POST body. No extra headers are signed.

use crate::config::EdgeGridConfig;
use crate::error::CcuClientError;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, Request};
use sha2::{Digest, Sha256};
use url::Url;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "EG1-HMAC-SHA256";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H:%M:%S+0000";

/// Timestamp in the form the scheme expects, e.g. `20140321T19:34:21+0000`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

pub fn nonce() -> String {
    Uuid::new_v4().to_string()
}

/// Compute the `Authorization` header value for a request.
///
/// `timestamp` and `nonce` are inputs so the result is reproducible.
pub fn authorization(
    config: &EdgeGridConfig,
    method: &Method,
    url: &Url,
    body: &[u8],
    timestamp: &str,
    nonce: &str,
) -> Result<String, CcuClientError> {
    let auth_prefix = format!(
        "{ALGORITHM} client_token={};access_token={};timestamp={timestamp};nonce={nonce};",
        config.client_token,
        config.access_token.expose(),
    );

    let signing_key = BASE64.encode(hmac_sha256(
        config.client_secret.expose().as_bytes(),
        timestamp.as_bytes(),
    )?);

    let data_to_sign = [
        method.as_str().to_uppercase(),
        url.scheme().to_string(),
        host_with_port(url),
        path_with_query(url),
        String::new(), // canonical headers
        content_hash(method, body, config.max_body),
        auth_prefix.clone(),
    ]
    .join("\t");

    let signature = BASE64.encode(hmac_sha256(signing_key.as_bytes(), data_to_sign.as_bytes())?);

    Ok(format!("{auth_prefix}signature={signature}"))
}

/// Sign `request` in place with a fresh timestamp and nonce.
pub fn sign_request(config: &EdgeGridConfig, request: &mut Request) -> Result<(), CcuClientError> {
    let body = request
        .body()
        .and_then(|body| body.as_bytes())
        .unwrap_or_default();

    let header = authorization(
        config,
        request.method(),
        request.url(),
        body,
        &timestamp(Utc::now()),
        &nonce(),
    )?;

    let value = HeaderValue::from_str(&header).map_err(|e| {
        CcuClientError::request_construction(format!("invalid EdgeGrid authorization header: {e}"))
    })?;
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}

fn content_hash(method: &Method, body: &[u8], max_body: usize) -> String {
    if *method != Method::POST || body.is_empty() {
        return String::new();
    }
    let signed = &body[..body.len().min(max_body)];
    BASE64.encode(Sha256::digest(signed))
}

fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

fn path_with_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CcuClientError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| {
        CcuClientError::request_construction(format!("invalid EdgeGrid signing key: {e}"))
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

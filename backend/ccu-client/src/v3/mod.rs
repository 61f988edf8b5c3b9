//! Client for the CCU v3 (Fast Purge) API.
//!
//! Requests are signed with EdgeGrid credentials. Unless a configuration is
//! supplied up front, it is loaded on first use (environment, then
//! `~/.edgerc`) and cached for the life of the client and its clones.
//!
//! v3 has no queue or status endpoints; purges complete in seconds.

pub mod signer;
mod types;

pub use types::{
    Network, PURGE_PATH_PREFIX, PurgeAction, PurgeRequest, PurgeResponse, PurgeType,
};

use crate::config::EdgeGridConfig;
use crate::context::RequestContext;
use crate::error::CcuClientError;
use crate::response::ensure_success;
use crate::transport::{CONTENT_TYPE_JSON, encode_json, endpoint, execute};

use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};
use once_cell::sync::OnceCell;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Request};
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug, Clone)]
pub struct CcuV3Client {
    client: Client,
    config: Arc<OnceCell<EdgeGridConfig>>,
    edgerc_path: Option<PathBuf>,
    section: Option<String>,
    base_url: Option<Url>,
}

impl CcuV3Client {
    /// Client that loads the `default` section lazily on first use.
    pub fn new() -> Result<Self, CcuClientError> {
        Self::with_http_client(Client::builder().build()?)
    }

    /// Like [`CcuV3Client::new`], sending through `client`.
    pub fn with_http_client(client: Client) -> Result<Self, CcuClientError> {
        Ok(Self {
            client,
            config: Arc::new(OnceCell::new()),
            edgerc_path: None,
            section: None,
            base_url: None,
        })
    }

    /// Client with an already loaded configuration. Nothing is read lazily.
    pub fn with_config(client: Client, config: EdgeGridConfig) -> Result<Self, CcuClientError> {
        config.validate()?;
        Ok(Self {
            client,
            config: Arc::new(OnceCell::with_value(config)),
            edgerc_path: None,
            section: None,
            base_url: None,
        })
    }

    /// Read the lazy configuration from `path` instead of `~/.edgerc`.
    pub fn with_edgerc(mut self, path: impl Into<PathBuf>) -> Self {
        self.edgerc_path = Some(path.into());
        self
    }

    /// Read the lazy configuration from `section` instead of `default`.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Send to this root instead of `https://{config.host}/`. The signature
    /// still covers the host actually contacted.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, CcuClientError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// The signing configuration, loading it once if necessary.
    ///
    /// Concurrent first calls block on a single load; a failed load is not
    /// cached and is retried on the next call.
    pub fn config(&self) -> Result<&EdgeGridConfig, CcuClientError> {
        let config = self.config.get_or_try_init(|| {
            EdgeGridConfig::load(self.edgerc_path.as_deref(), self.section.as_deref())
        })?;
        Ok(config)
    }

    /// Submit a purge. `context` is optional; without one the call is
    /// bounded only by the HTTP client's own settings.
    pub async fn purge(
        &self,
        request: &PurgeRequest,
        context: Option<&RequestContext>,
    ) -> Result<PurgeResponse, CcuClientError> {
        let request = request.with_defaults();
        let body = encode_json(&request)?;
        let http_request = self.new_request(Method::POST, &request.path(), Some(body))?;

        let reply: PurgeResponse = self.send(http_request, context).await?;
        ensure_success(&reply.response)?;

        info!(
            "Fast purge {} accepted at {} ({} objects, ~{}s)",
            reply.purge_id,
            request.path(),
            request.objects.len(),
            reply.estimated_seconds
        );
        Ok(reply)
    }

    /// Build a request and sign it. A body is always JSON.
    fn new_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, CcuClientError> {
        let config = self.config()?;
        let base_url = match &self.base_url {
            Some(base_url) => base_url.clone(),
            None => config.base_url()?,
        };
        let url = endpoint(&base_url, path)?;

        let mut builder = self.client.request(method, url);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, CONTENT_TYPE_JSON).body(body);
        }
        let mut request = builder.build().map_err(|e| {
            CcuClientError::request_construction(format!("error creating HTTP request: {e}"))
        })?;

        signer::sign_request(config, &mut request)?;
        Ok(request)
    }

    /// Send and decode. A malformed body keeps the partial reply on the error.
    async fn send<T: DeserializeOwned>(
        &self,
        request: Request,
        context: Option<&RequestContext>,
    ) -> Result<T, CcuClientError> {
        let reply = execute(&self.client, request, context).await?;

        match serde_json::from_slice(&reply.body) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("Undecodable CCU v3 reply (HTTP {}): {}", reply.status, e);
                Err(CcuClientError::decode(
                    format!("error decoding JSON response: {e}"),
                    Some(reply.into_partial()),
                ))
            }
        }
    }
}

//! Client for the CCU v2 API: queue-based purges authenticated with HTTP Basic.
//!
//! ```no_run
//! use ccu_client::context::RequestContext;
//! use ccu_client::v2::{CcuV2Client, PurgeRequest};
//!
//! # async fn run() -> Result<(), ccu_client::error::CcuClientError> {
//! let client = CcuV2Client::from_env()?;
//! let context = RequestContext::background();
//!
//! let request = PurgeRequest::new(["https://www.example.com/index.html"]);
//! let purge = client.purge(&request, &context).await?;
//! let status = client.purge_status(&purge.purge_id, &context).await?;
//! println!("done: {} (eta {:?})", status.is_done(), purge.eta());
//! # Ok(())
//! # }
//! ```

mod types;

pub use types::{
    DEFAULT_QUEUE, Domain, PURGE_STATUS_DONE, PurgeAction, PurgeRequest, PurgeResponse,
    PurgeStatusResponse, PurgeType, QueueLengthResponse,
};

use crate::context::RequestContext;
use crate::credentials::BasicCredentials;
use crate::error::CcuClientError;
use crate::response::ensure_success;
use crate::transport::{
    CONTENT_TYPE_JSON, encode_json, endpoint, endpoint_with_segment, execute,
};

use common::HttpStatusCode;

use chrono::Utc;
use log::{info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Request};
use serde::de::DeserializeOwned;
use url::Url;

pub const CCU_V2_API_URL: &str = "https://api.ccu.akamai.com";
const QUEUES_ENDPOINT: &str = "/ccu/v2/queues";
const PURGES_ENDPOINT: &str = "/ccu/v2/purges";
const DEFAULT_QUEUE_ENDPOINT: &str = const_format::concatcp!(QUEUES_ENDPOINT, "/", DEFAULT_QUEUE);

#[derive(Debug, Clone)]
pub struct CcuV2Client {
    base_url: Url,
    client: Client,
    credentials: BasicCredentials,
}

impl CcuV2Client {
    /// Client against the public API with a default HTTP client.
    pub fn new(credentials: BasicCredentials) -> Result<Self, CcuClientError> {
        Self::with_http_client(Client::builder().build()?, credentials)
    }

    /// Client against the public API sending through `client`.
    pub fn with_http_client(
        client: Client,
        credentials: BasicCredentials,
    ) -> Result<Self, CcuClientError> {
        Ok(Self {
            base_url: Url::parse(CCU_V2_API_URL)?,
            client,
            credentials,
        })
    }

    /// Client with credentials from `AKAMAI_CCU_USERNAME` and `AKAMAI_CCU_PASSWORD`.
    pub fn from_env() -> Result<Self, CcuClientError> {
        Self::new(BasicCredentials::from_env()?)
    }

    /// Point the client at another API root (a proxy or a mock server).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, CcuClientError> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &BasicCredentials {
        &self.credentials
    }

    /// Number of purges currently waiting in the default queue.
    pub async fn queue_length(
        &self,
        context: &RequestContext,
    ) -> Result<QueueLengthResponse, CcuClientError> {
        let url = endpoint(&self.base_url, DEFAULT_QUEUE_ENDPOINT)?;
        let request = self.new_request(Method::GET, url, None)?;
        let reply: QueueLengthResponse = self.send(request, context).await?;
        ensure_success(&reply.response)?;
        Ok(reply)
    }

    /// Enqueue a purge. The server processes it asynchronously; poll
    /// [`CcuV2Client::purge_status`] with the returned id.
    pub async fn purge(
        &self,
        request: &PurgeRequest,
        context: &RequestContext,
    ) -> Result<PurgeResponse, CcuClientError> {
        let request = request.with_defaults();
        let url =
            endpoint_with_segment(&self.base_url, QUEUES_ENDPOINT, request.queue_name())?;
        let body = encode_json(&request)?;
        let http_request = self.new_request(Method::POST, url, Some(body))?;

        let mut reply: PurgeResponse = self.send(http_request, context).await?;
        ensure_success(&reply.response)?;
        reply.submitted_at = Some(Utc::now());

        info!(
            "Purge {} accepted on queue '{}' ({} objects, ~{}s)",
            reply.purge_id,
            request.queue_name(),
            request.objects.len(),
            reply.estimated_seconds
        );
        Ok(reply)
    }

    /// Current status of a purge previously returned by [`CcuV2Client::purge`].
    ///
    /// An id the server does not know comes back as an `Api` error for which
    /// [`CcuClientError::is_not_found`] holds.
    pub async fn purge_status(
        &self,
        purge_id: &str,
        context: &RequestContext,
    ) -> Result<PurgeStatusResponse, CcuClientError> {
        let url = endpoint_with_segment(&self.base_url, PURGES_ENDPOINT, purge_id)?;
        let request = self.new_request(Method::GET, url, None)?;
        let reply: PurgeStatusResponse = self.send(request, context).await?;
        ensure_success(&reply.response)?;
        Ok(reply)
    }

    /// Build an authenticated request. A body is always JSON.
    fn new_request(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Request, CcuClientError> {
        let mut builder = self.client.request(method, url).basic_auth(
            &self.credentials.username,
            Some(self.credentials.password.expose()),
        );
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, CONTENT_TYPE_JSON).body(body);
        }
        builder.build().map_err(|e| {
            CcuClientError::request_construction(format!("error creating HTTP request: {e}"))
        })
    }

    /// Send and decode. A raw 401 short-circuits before the body is read as
    /// JSON; a malformed body is discarded.
    async fn send<T: DeserializeOwned>(
        &self,
        request: Request,
        context: &RequestContext,
    ) -> Result<T, CcuClientError> {
        let reply = execute(&self.client, request, Some(context)).await?;

        if reply.status == HttpStatusCode::UNAUTHORIZED {
            warn!("CCU v2 rejected credentials for '{}'", self.credentials.username);
            return Err(CcuClientError::unauthorized());
        }

        serde_json::from_slice(&reply.body).map_err(|e| {
            warn!("Undecodable CCU v2 reply (HTTP {}): {}", reply.status, e);
            CcuClientError::decode(format!("error decoding JSON response: {e}"), None)
        })
    }
}

//! Request plumbing shared by both API versions: JSON encoding, endpoint
//! resolution and the send/read exchange. Authentication and decoding policy
//! stay with each version.

use crate::context::RequestContext;
use crate::error::CcuClientError;
use crate::response::PartialResponse;

use common::HttpStatusCode;

use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Client, Request};
use serde::Serialize;
use url::Url;

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";

/// Status, headers and full body of a reply, before any decoding.
#[derive(Debug)]
pub(crate) struct RawReply {
    pub status: HttpStatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawReply {
    pub fn into_partial(self) -> PartialResponse {
        PartialResponse {
            status: self.status,
            headers: self.headers,
            body: String::from_utf8_lossy(&self.body).into_owned(),
        }
    }
}

#[track_caller]
pub(crate) fn encode_json<P: Serialize>(payload: &P) -> Result<Vec<u8>, CcuClientError> {
    serde_json::to_vec(payload)
        .map_err(|e| CcuClientError::encoding(format!("error encoding request as JSON: {e}")))
}

#[track_caller]
pub(crate) fn endpoint(base_url: &Url, path: &str) -> Result<Url, CcuClientError> {
    Ok(base_url.join(path)?)
}

/// `path` plus one trailing segment. `segment` is percent-encoded, so `/`,
/// `?` and `#` in it stay part of the segment.
#[track_caller]
pub(crate) fn endpoint_with_segment(
    base_url: &Url,
    path: &str,
    segment: &str,
) -> Result<Url, CcuClientError> {
    let mut url = endpoint(base_url, path)?;
    url.path_segments_mut()
        .map_err(|_| {
            CcuClientError::request_construction(format!(
                "cannot append a path segment to {base_url}"
            ))
        })?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

/// Send `request` and read the whole body, bound to `context` when given.
pub(crate) async fn execute(
    client: &Client,
    request: Request,
    context: Option<&RequestContext>,
) -> Result<RawReply, CcuClientError> {
    debug!("{} {}", request.method(), request.url());

    let exchange = async {
        let response = client.execute(request).await?;
        let status = HttpStatusCode(response.status().as_u16());
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok::<_, CcuClientError>(RawReply {
            status,
            headers,
            body,
        })
    };

    let reply = match context {
        Some(context) => context.run(exchange).await??,
        None => exchange.await?,
    };

    debug!("HTTP {} ({} bytes)", reply.status, reply.body.len());
    Ok(reply)
}

//! Request and response bodies for the v3 (Fast Purge) API.

use crate::response::ApiResponse;

use std::fmt;

use serde::{Deserialize, Serialize};

pub const PURGE_PATH_PREFIX: &str = "/ccu/v3";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeType {
    #[default]
    Url,
    Cpcode,
    Tag,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeAction {
    /// Mark content stale; the edge revalidates with the origin.
    #[default]
    Invalidate,
    /// Remove content from the edge entirely.
    Delete,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Production,
    Staging,
}

impl PurgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurgeType::Url => "url",
            PurgeType::Cpcode => "cpcode",
            PurgeType::Tag => "tag",
        }
    }
}

impl PurgeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurgeAction::Invalidate => "invalidate",
            PurgeAction::Delete => "delete",
        }
    }
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Production => "production",
            Network::Staging => "staging",
        }
    }
}

impl fmt::Display for PurgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PurgeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Fast Purge request.
///
/// Type, action and network select the endpoint and are not sent in the
/// body. Unset ones default to `url`, `invalidate` and `production` at
/// submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeRequest {
    #[serde(skip)]
    pub purge_type: Option<PurgeType>,

    #[serde(skip)]
    pub action: Option<PurgeAction>,

    #[serde(skip)]
    pub network: Option<Network>,

    /// Domain the content is purged from, when `objects` are URL paths
    /// rather than full URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// URLs, CP codes or cache tags. Forwarded as-is, even when empty.
    #[serde(default)]
    pub objects: Vec<String>,
}

impl PurgeRequest {
    /// A request for `objects` with every classification field unset.
    pub fn new<I, S>(objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            objects: objects.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, purge_type: PurgeType) -> Self {
        self.purge_type = Some(purge_type);
        self
    }

    pub fn with_action(mut self, action: PurgeAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Copy of this request with unset classification fields defaulted.
    /// Fields that are already set are kept.
    pub fn with_defaults(&self) -> Self {
        Self {
            purge_type: Some(self.purge_type.unwrap_or_default()),
            action: Some(self.action.unwrap_or_default()),
            network: Some(self.network.unwrap_or_default()),
            hostname: self.hostname.clone(),
            objects: self.objects.clone(),
        }
    }

    /// API path for this request: `/ccu/v3/{action}/{type}/{network}`.
    pub fn path(&self) -> String {
        format!(
            "{PURGE_PATH_PREFIX}/{}/{}/{}",
            self.action.unwrap_or_default(),
            self.purge_type.unwrap_or_default(),
            self.network.unwrap_or_default()
        )
    }
}

/// Reply to a Fast Purge submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PurgeResponse {
    #[serde(flatten)]
    pub response: ApiResponse,

    pub estimated_seconds: i64,

    pub purge_id: String,
}

//! Request and response bodies for the v2 queue-based API.

use crate::response::ApiResponse;

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Queue used when [`PurgeRequest::queue`] is blank.
pub const DEFAULT_QUEUE: &str = "default";

/// Status text the server reports once a purge has finished.
pub const PURGE_STATUS_DONE: &str = "Done";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeType {
    /// Purge by URL (Akamaized Resource Locator).
    #[default]
    Arl,
    /// Purge every object under a CP code.
    Cpcode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeAction {
    #[default]
    Remove,
    Invalidate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    Production,
    Staging,
}

impl PurgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurgeType::Arl => "arl",
            PurgeType::Cpcode => "cpcode",
        }
    }
}

impl PurgeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurgeAction::Remove => "remove",
            PurgeAction::Invalidate => "invalidate",
        }
    }
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Production => "production",
            Domain::Staging => "staging",
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

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purge to enqueue.
///
/// Classification fields left as `None` are filled with the defaults
/// (`arl`, `remove`, `production`) when the request is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeRequest {
    /// Target queue. Not part of the body; blank means [`DEFAULT_QUEUE`].
    #[serde(skip)]
    pub queue: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub purge_type: Option<PurgeType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<PurgeAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,

    /// URLs or CP codes. Forwarded as-is, even when empty.
    #[serde(default)]
    pub objects: Vec<String>,
}

impl PurgeRequest {
    /// A request for `objects` with every classification field set to its
    /// default.
    pub fn new<I, S>(objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: String::new(),
            purge_type: Some(PurgeType::default()),
            action: Some(PurgeAction::default()),
            domain: Some(Domain::default()),
            objects: objects.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = queue.into();
        self
    }

    pub fn with_type(mut self, purge_type: PurgeType) -> Self {
        self.purge_type = Some(purge_type);
        self
    }

    pub fn with_action(mut self, action: PurgeAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Copy of this request with unset classification fields defaulted.
    /// Fields that are already set are kept.
    pub fn with_defaults(&self) -> Self {
        Self {
            queue: self.queue.clone(),
            purge_type: Some(self.purge_type.unwrap_or_default()),
            action: Some(self.action.unwrap_or_default()),
            domain: Some(self.domain.unwrap_or_default()),
            objects: self.objects.clone(),
        }
    }

    /// Queue name the request is posted to. Only an empty name falls back to
    /// [`DEFAULT_QUEUE`]; anything else is sent as given.
    pub fn queue_name(&self) -> &str {
        if self.queue.is_empty() {
            DEFAULT_QUEUE
        } else {
            &self.queue
        }
    }
}

/// Reply to a queue length query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueueLengthResponse {
    #[serde(flatten)]
    pub response: ApiResponse,

    /// Number of purge requests waiting in the queue.
    pub queue_length: i64,
}

/// Reply to a purge submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PurgeResponse {
    #[serde(flatten)]
    pub response: ApiResponse,

    pub estimated_seconds: i64,

    pub purge_id: String,

    /// Path to poll for this purge's status.
    pub progress_uri: String,

    /// Suggested delay before the first status poll.
    pub ping_after_seconds: i64,

    /// Client clock at the moment the server accepted the purge.
    #[serde(skip)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl PurgeResponse {
    /// Estimated completion: submission time plus `estimated_seconds`.
    ///
    /// `None` until the response has been stamped by a successful submission,
    /// and when `estimated_seconds` does not fit in a date.
    pub fn eta(&self) -> Option<DateTime<Utc>> {
        let submitted = self.submitted_at?;
        let estimate = Duration::try_seconds(self.estimated_seconds)?;
        submitted.checked_add_signed(estimate)
    }
}

/// Reply to a purge status query.
///
/// Timestamps are passed through as the server formats them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PurgeStatusResponse {
    #[serde(flatten)]
    pub response: ApiResponse,

    pub original_estimated_seconds: i64,

    pub original_queue_length: i64,

    pub purge_id: String,

    pub completion_time: String,

    pub submitted_by: String,

    /// e.g. "In-Progress" or "Done".
    pub purge_status: String,

    pub submission_time: String,
}

impl PurgeStatusResponse {
    /// True only for the exact, case-sensitive status `"Done"`.
    pub fn is_done(&self) -> bool {
        self.purge_status == PURGE_STATUS_DONE
    }
}

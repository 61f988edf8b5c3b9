//! HTTP status code classification.
//!
//! The purge API reports its status twice: once as the transport status and
//! once as `httpStatus` inside the JSON body. Both are classified here.

/// HTTP status code for error categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const UNAUTHORIZED: HttpStatusCode = HttpStatusCode(401);
    pub const NOT_FOUND: HttpStatusCode = HttpStatusCode(404);

    /// 2xx, inclusive on both ends.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.0)
    }

    /// Codes a caller may reasonably retry. Nothing in this workspace retries
    /// on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self.0, 502 | 503 | 504 | 429)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Caller-owned cancellation and deadlines for a single API call.
//!
//! The client never times out or retries on its own. A call bound to a
//! cancelled or expired context fails with a `Transport` error.

use crate::error::CcuClientError;

use std::future::{Future, pending};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

/// Cancellation signal and optional deadline for one or more calls.
///
/// Cloning shares the cancellation signal; every clone observes
/// [`CancelHandle::cancel`].
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Cancels every [`RequestContext`] created alongside it.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace never fails, even with no receivers left
        self.sender.send_replace(true);
    }
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Deadline `timeout` from now. A timeout too large to represent as an
    /// instant means no deadline at all.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::background(),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    pub fn cancellable() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let context = Self {
            deadline: None,
            cancel: Some(receiver),
        };
        (context, CancelHandle { sender })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|receiver| *receiver.borrow())
    }

    /// Drive `operation` until it completes, the context is cancelled or the
    /// deadline passes, whichever comes first.
    pub(crate) async fn run<F>(&self, operation: F) -> Result<F::Output, CcuClientError>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(CcuClientError::cancelled());
        }
        if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            return Err(CcuClientError::deadline_exceeded());
        }

        let receiver = self.cancel.clone();
        let cancelled = async move {
            match receiver {
                Some(mut receiver) => {
                    // Sender dropped without cancelling: never fires
                    let closed = receiver.wait_for(|cancelled| *cancelled).await.is_err();
                    if closed {
                        pending::<()>().await;
                    }
                }
                None => pending::<()>().await,
            }
        };

        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            output = operation => Ok(output),
            _ = cancelled => Err(CcuClientError::cancelled()),
            _ = expired => Err(CcuClientError::deadline_exceeded()),
        }
    }
}

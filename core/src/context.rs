//! Per-call cancellation and deadlines.
//!
//! Calls are blocking, so cancellation is cooperative: the flag is checked
//! before a request goes out and again once its response is back, and the
//! time left before the deadline bounds the transport timeout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::ApiError;

/// Caller-supplied context threaded through every API call.
///
/// Clones share the cancellation flag, so a clone handed to another thread
/// can cancel calls made with the original.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl CallContext {
    /// A context that never expires and is not cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// Tighten the deadline to at most `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Tighten the deadline to at most `deadline`. An earlier existing
    /// deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fail if the call should not proceed.
    pub fn check(&self) -> Result<(), ApiError> {
        if self.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        if self.remaining() == Some(Duration::ZERO) {
            return Err(ApiError::DeadlineExceeded);
        }
        Ok(())
    }
}

//! Error types for the poll loop.

use thiserror::Error;

/// Errors returned by a [`PollHandler`](crate::PollHandler).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    /// The cycle failed; the next one may succeed.
    #[error("Poll failed: {0}")]
    Poll(String),

    /// The session is gone. Ends the loop.
    #[error("Fatal poll error: {0}")]
    Fatal(String),
}

impl PollError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, PollError::Fatal(_))
    }
}

//! Error types for the protocol layer.

use thiserror::Error;

/// Errors raised by a [`DomAccessor`](crate::DomAccessor) or
/// [`BrowserSession`](crate::BrowserSession) implementation.
///
/// Absence of an element is not an error; accessors return `None` for that.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomError {
    /// A handle no longer refers to a live element.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Script evaluation inside the page failed.
    #[error("Script error: {0}")]
    Script(String),

    /// A bounded operation did not complete in time.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The browser connection is gone.
    #[error("Browser session closed")]
    SessionClosed,

    /// Any other backend failure.
    #[error("Browser error: {0}")]
    Browser(String),
}

impl DomError {
    /// Whether the error means the session cannot be used any more.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomError::SessionClosed)
    }
}

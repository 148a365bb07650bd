//! CDP error types.

use pokernow_protocols::DomError;
use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Chrome not found or not running with remote debugging.
    #[error("Chrome not available at {0}. Start Chrome with: chrome --remote-debugging-port=9222")]
    ChromeNotAvailable(String),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript execution error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    /// The WebSocket to Chrome is gone.
    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// The socket to Chrome is gone; no later command can succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CdpError::SessionClosed | CdpError::WebSocket(_))
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error as WsError;
        match e {
            WsError::ConnectionClosed | WsError::AlreadyClosed => CdpError::SessionClosed,
            other => CdpError::WebSocket(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for DomError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::SessionClosed | CdpError::WebSocket(_) => DomError::SessionClosed,
            CdpError::JavaScript(msg) => DomError::Script(msg),
            CdpError::Timeout(msg) => DomError::Timeout(msg),
            // -32000 is what Chrome answers for stale or released object ids.
            CdpError::Protocol { code: -32000, message } => DomError::ElementNotFound(message),
            other => DomError::Browser(other.to_string()),
        }
    }
}

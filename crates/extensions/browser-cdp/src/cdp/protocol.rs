//! Wire types for the DevTools protocol.
//!
//! Only the fields this crate reads are modelled; serde skips the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing command. `session_id` routes it to an attached page.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Incoming message: a command reply when `id` is set, an event otherwise.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<ProtocolError>,
    pub method: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProtocolError {
    pub code: i64,
    pub message: String,
}

/// `GET /json/version`. Chrome answers with PascalCase keys here.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

// ============================================================================
// Runtime
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub subtype: Option<String>,
    pub value: Option<Value>,
    pub object_id: Option<String>,
}

impl RemoteObject {
    /// `null` or `undefined`, e.g. a `querySelector` without a match.
    pub fn is_null(&self) -> bool {
        self.subtype.as_deref() == Some("null") || self.object_type == "undefined"
    }
}

/// Entry of a `Runtime.getProperties` reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    pub value: Option<RemoteObject>,
    #[serde(default)]
    pub enumerable: bool,
}

// ============================================================================
// Input
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MouseEventKind {
    #[serde(rename = "mouseMoved")]
    Moved,
    #[serde(rename = "mousePressed")]
    Pressed,
    #[serde(rename = "mouseReleased")]
    Released,
}

/// `Input.dispatchMouseEvent` parameters. Buttons are always the left one.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseEvent {
    #[serde(rename = "type")]
    pub kind: MouseEventKind,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_count: Option<u32>,
}

impl MouseEvent {
    pub fn moved(x: f64, y: f64) -> Self {
        Self { kind: MouseEventKind::Moved, x, y, button: None, click_count: None }
    }

    pub fn left(kind: MouseEventKind, x: f64, y: f64) -> Self {
        Self { kind, x, y, button: Some("left"), click_count: Some(1) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyEventKind {
    KeyDown,
    KeyUp,
}

/// `Input.dispatchKeyEvent` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct KeyEvent<'a> {
    #[serde(rename = "type")]
    pub kind: KeyEventKind,
    pub key: &'a str,
    pub modifiers: i32,
}

/// Element box reported by the scroll-and-measure script.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ClickPoint {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ClickPoint {
    /// Zero-sized boxes cannot be hit with synthetic mouse events.
    pub fn is_clickable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;

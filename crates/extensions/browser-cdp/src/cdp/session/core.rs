//! Page session: a target attached in flatten mode on the shared socket.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::cdp::client::Connection;
use crate::cdp::error::CdpError;

const ENABLED_DOMAINS: [&str; 4] = ["Page", "DOM", "Runtime", "Network"];

/// A flattened session attached to a single page target.
pub struct PageSession {
    pub(super) target_id: String,
    pub(super) session_id: String,
    pub(super) conn: Arc<Connection>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, conn: Arc<Connection>) -> Self {
        Self {
            target_id,
            session_id,
            conn,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.conn.send(method, params, Some(&self.session_id)).await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        for domain in ENABLED_DOMAINS {
            self.call(&format!("{}.enable", domain), None).await?;
        }
        debug!("Session {} attached to {}", self.session_id, self.target_id);
        Ok(())
    }

    /// Close the page.
    pub async fn close(&self) -> Result<(), CdpError> {
        self.call("Page.close", None).await?;
        debug!("Closed page {}", self.target_id);
        Ok(())
    }
}

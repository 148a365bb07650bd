//! Navigation and load waiting.

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate and wait for the document to become interactive.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        self.wait_for_load().await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Wait until `document.readyState` is interactive or complete.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let wait = async {
            loop {
                let state = self.evaluate("document.readyState").await?;
                if matches!(state.as_str(), Some("complete") | Some("interactive")) {
                    return Ok::<(), CdpError>(());
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(LOAD_TIMEOUT, wait)
            .await
            .map_err(|_| CdpError::Timeout("Page load timeout".to_string()))?
    }

    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or_default().to_string())
    }

    /// Poll for `selector` until it matches or `timeout` elapses.
    ///
    /// Returns `None` on timeout. Errors other than losing the socket count
    /// as a miss, since the document may be mid-navigation.
    pub async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<String>, CdpError> {
        let wait = async {
            loop {
                match self.query_selector(selector, None).await {
                    Ok(Some(object_id)) => return Ok::<String, CdpError>(object_id),
                    Ok(None) => {}
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => debug!("Query for '{}' failed, retrying: {}", selector, e),
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        match tokio::time::timeout(timeout, wait).await {
            Ok(result) => result.map(Some),
            Err(_) => {
                debug!("Waiting for '{}' timed out after {:?}", selector, timeout);
                Ok(None)
            }
        }
    }
}

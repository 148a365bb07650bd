//! Cookie operations for CDP page session.

use pokernow_protocols::Cookie;
use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Cookies visible to the current page.
    pub async fn get_cookies(&self) -> Result<Vec<Cookie>, CdpError> {
        let result = self.call("Network.getCookies", Some(json!({}))).await?;
        let cookies: Vec<Cookie> = serde_json::from_value(result["cookies"].clone())?;
        debug!("Read {} cookies", cookies.len());
        Ok(cookies)
    }

    pub async fn set_cookies(&self, cookies: &[Cookie]) -> Result<(), CdpError> {
        if cookies.is_empty() {
            return Ok(());
        }
        // Session cookies come back from Chrome with `expires: -1`.
        let params: Vec<Cookie> = cookies
            .iter()
            .cloned()
            .map(|mut cookie| {
                cookie.expires = cookie.expires.filter(|e| *e > 0.0);
                cookie
            })
            .collect();
        self.call(
            "Network.setCookies",
            Some(json!({"cookies": params})),
        )
        .await?;
        debug!("Installed {} cookies", cookies.len());
        Ok(())
    }
}

//! Browser session protocol.
//!
//! A session owns one page of the browser. It is acquired once by the driving
//! process and closed on every exit path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomError;

/// A browser cookie as exchanged with the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    /// Expiry as seconds since the epoch; `None` for session cookies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
}

fn default_path() -> String {
    "/".to_string()
}

impl Cookie {
    /// Create a session cookie for `domain`.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: default_path(),
            secure: false,
            http_only: false,
            expires: None,
        }
    }

    /// Whether this cookie belongs to the page at `url`.
    ///
    /// Matches when the cookie domain (without a leading dot) occurs in the URL.
    pub fn matches_url(&self, url: &str) -> bool {
        let domain = self.domain.trim_start_matches('.');
        url.contains(domain)
    }
}

/// Page-level browser session.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the page to `url` and wait for it to load.
    async fn navigate(&self, url: &str) -> Result<(), DomError>;

    /// URL of the page as currently loaded.
    async fn current_url(&self) -> Result<String, DomError>;

    /// All cookies visible to the page.
    async fn get_cookies(&self) -> Result<Vec<Cookie>, DomError>;

    /// Install cookies into the browser.
    async fn set_cookies(&self, cookies: &[Cookie]) -> Result<(), DomError>;

    /// Close the page. The session is unusable afterwards.
    async fn close(&self) -> Result<(), DomError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_matches_url() {
        let cookie = Cookie::new("npt", "abc", "www.pokernow.club");
        assert!(cookie.matches_url("https://www.pokernow.club/games/pglXyz"));
        assert!(!cookie.matches_url("https://example.com/"));
    }

    #[test]
    fn test_cookie_leading_dot_domain() {
        let cookie = Cookie::new("npt", "abc", ".pokernow.club");
        assert!(cookie.matches_url("https://www.pokernow.club/games/pglXyz"));
    }

    #[test]
    fn test_cookie_deserialize_cdp_shape() {
        let json = r#"{
            "name": "npt",
            "value": "token",
            "domain": ".pokernow.club",
            "path": "/",
            "expires": 1790000000.5,
            "size": 8,
            "httpOnly": true,
            "secure": true,
            "session": false
        }"#;
        let cookie: Cookie = serde_json::from_str(json).unwrap();
        assert_eq!(cookie.name, "npt");
        assert!(cookie.http_only);
        assert_eq!(cookie.expires, Some(1790000000.5));
    }
}

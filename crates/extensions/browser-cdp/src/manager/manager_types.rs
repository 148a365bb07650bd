//! Browser manager type definitions and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::cdp::CdpError;

/// Browser manager errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Chrome not found. Please install Google Chrome or set browser.chrome_path.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error("Nothing listens on {0} and launching Chrome is disabled")]
    NotRunning(String),

    #[error("Browser error: {0}")]
    Cdp(String),
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::ChromeNotAvailable(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::SessionClosed => BrowserError::NotConnected,
            other => BrowserError::Cdp(other.to_string()),
        }
    }
}

/// Browser configuration.
#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    /// Profile directory for persistent login state.
    pub profile_dir: Option<PathBuf>,
    /// Chrome executable; searched in well-known locations when unset.
    pub chrome_path: Option<PathBuf>,
    /// Whether a launched Chrome runs headless.
    pub headless: bool,
    /// Launch Chrome when nothing listens on the debug port.
    pub launch: bool,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            profile_dir: None,
            chrome_path: None,
            headless: true,
            launch: true,
        }
    }
}

impl BrowserManagerConfig {
    /// The profile directory, defaulting to `~/.pokernow/browser-profile`.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".pokernow")
                .join("browser-profile")
        })
    }

    /// The CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }

    /// Command line for a launched Chrome.
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debug_port),
            format!("--user-data-dir={}", self.get_profile_dir().display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
        ];
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args
    }
}

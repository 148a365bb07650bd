//! BrowserManager: Chrome discovery, launch, connection and pages.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cdp::CdpClient;
use crate::page::CdpPage;
use super::{BrowserError, BrowserManagerConfig};

/// Attempts to reach the debug port after launching Chrome.
const STARTUP_ATTEMPTS: u32 = 30;
const STARTUP_POLL: Duration = Duration::from_millis(200);

/// Manages the Chrome process and the CDP connection to it.
pub struct BrowserManager {
    config: BrowserManagerConfig,
    client: RwLock<Option<Arc<CdpClient>>>,
    pages: RwLock<Vec<CdpPage>>,
    /// Chrome process handle, if we launched it. Killed on drop.
    chrome_process: RwLock<Option<Child>>,
}

impl BrowserManager {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            pages: RwLock::new(Vec::new()),
            chrome_process: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Find a Chrome executable in well-known locations.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    fn chrome_path(&self) -> Result<PathBuf, BrowserError> {
        match &self.config.chrome_path {
            Some(path) => Ok(path.clone()),
            None => Self::find_chrome().ok_or(BrowserError::ChromeNotFound),
        }
    }

    /// Whether something answers on the debug port.
    async fn is_chrome_running(&self) -> bool {
        reqwest::get(format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = self.chrome_path()?;
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let child = Command::new(&chrome_path)
            .args(self.config.chrome_args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to Chrome, launching it first when allowed and needed.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        if self.is_chrome_running().await {
            info!("Chrome already running on port {}", self.config.debug_port);
        } else if !self.config.launch {
            return Err(BrowserError::NotRunning(self.config.endpoint()));
        } else {
            info!("Chrome not running on port {}, launching...", self.config.debug_port);

            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let mut ready = false;
            for _ in 0..STARTUP_ATTEMPTS {
                tokio::time::sleep(STARTUP_POLL).await;
                if self.is_chrome_running().await {
                    ready = true;
                    break;
                }
            }
            if !ready {
                return Err(BrowserError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        info!(
            "Connected to {} at {}",
            client.product().unwrap_or("Chrome"),
            self.config.endpoint()
        );
        *self.client.write().await = Some(Arc::new(client));
        Ok(())
    }

    async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// Open a blank tab and attach to it.
    pub async fn open_page(&self) -> Result<CdpPage, BrowserError> {
        self.connect().await?;
        let client = self.client().await?;

        let session = client.new_page(None).await?;
        let page = CdpPage::new(Arc::new(session));
        self.pages.write().await.push(page.clone());

        debug!("Opened page {}", page.target_id());
        Ok(page)
    }

    /// Close opened pages and the connection, and stop Chrome if we launched
    /// it. Safe to call more than once.
    pub async fn shutdown(&self) -> Result<(), BrowserError> {
        let pages: Vec<CdpPage> = self.pages.write().await.drain(..).collect();
        if let Some(client) = self.client.write().await.take() {
            for page in pages {
                if client.is_closed() {
                    break;
                }
                if let Err(e) = client.close_page(page.target_id()).await {
                    debug!("Failed to close page {}: {}", page.target_id(), e);
                }
            }
        }

        if let Some(mut child) = self.chrome_process.write().await.take() {
            info!("Shutting down Chrome...");
            if let Err(e) = child.kill().await {
                warn!("Failed to stop Chrome: {}", e);
            }
        }

        info!("Browser connection closed");
        Ok(())
    }
}

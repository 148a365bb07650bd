//! Opening and closing the PokerNow game page.

use anyhow::{bail, Context};
use pokernow_browser::{BrowserManager, CdpPage, CookieStore, CookieSync};
use pokernow_config::Config;
use pokernow_protocols::{BrowserSession, DomAccessor};
use pokernow_table::selectors;
use tracing::{info, warn};

/// A game page with cookies restored and the table rendered.
pub(crate) struct TableSession {
    page: CdpPage,
}

impl TableSession {
    /// Navigate to `url`, sync cookies and wait for the seats to render.
    pub(crate) async fn open(
        manager: &BrowserManager,
        cookies: &CookieStore,
        config: &Config,
        url: &str,
    ) -> anyhow::Result<Self> {
        let page = manager.open_page().await.context("Failed to open a browser page")?;

        page.navigate(url).await.with_context(|| format!("Failed to open {}", url))?;
        info!("Navigated to the game URL. Waiting for the page to load...");

        match cookies.restore_or_capture(&page).await {
            // Restored cookies only apply to requests made after they are set.
            Ok(CookieSync::Restored(n)) if n > 0 => {
                page.navigate(url).await.with_context(|| format!("Failed to reload {}", url))?;
            }
            Ok(_) => {}
            Err(e) => warn!("Cookie sync failed: {}", e),
        }

        let timeout = config.poll.table_load_timeout();
        let seats = page.wait_for(selectors::SEAT, timeout).await?;
        if seats.is_none() {
            bail!("Timed out after {:?} waiting for game elements to load", timeout);
        }
        page.release().await?;
        info!("Game elements detected. Proceeding to capture game state.");

        Ok(Self { page })
    }

    pub(crate) fn page(&self) -> &CdpPage {
        &self.page
    }

    /// Persist cookies and close the page. Failures are logged only.
    pub(crate) async fn close(self, cookies: &CookieStore) {
        match cookies.save(&self.page).await {
            Ok(n) => info!("Saved {} cookies to {}", n, cookies.path().display()),
            Err(e) => warn!("Failed to save cookies: {}", e),
        }
        if let Err(e) = self.page.close().await {
            warn!("Failed to close page: {}", e);
        }
    }
}

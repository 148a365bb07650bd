//! Cookie persistence between runs.
//!
//! The store is a JSON array of cookies as Chrome reports them. On startup
//! the cookies whose domain matches the current page are restored; when no
//! file exists yet the current cookies are captured instead.

use std::path::{Path, PathBuf};

use pokernow_protocols::{BrowserSession, Cookie, DomError};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CookieStoreError {
    #[error("Cookie file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cookie file {} is not valid JSON: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Browser(#[from] DomError),
}

/// What [`CookieStore::restore_or_capture`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSync {
    /// This many stored cookies were installed.
    Restored(usize),
    /// No store existed; this many cookies were written to it.
    Captured(usize),
}

/// JSON file holding session cookies.
#[derive(Debug, Clone)]
pub struct CookieStore {
    path: PathBuf,
}

impl CookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Vec<Cookie>, CookieStoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| CookieStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CookieStoreError::Format {
            path: self.path.clone(),
            source,
        })
    }

    pub fn write(&self, cookies: &[Cookie]) -> Result<(), CookieStoreError> {
        let io_err = |source| CookieStoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(cookies).map_err(|source| {
            CookieStoreError::Format {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, content).map_err(io_err)
    }

    /// Stored cookies that apply to `url`.
    pub fn cookies_for(&self, url: &str) -> Result<Vec<Cookie>, CookieStoreError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|cookie| cookie.matches_url(url))
            .collect())
    }

    /// Restore stored cookies for the session's current page, or capture
    /// the session's cookies when nothing is stored yet.
    pub async fn restore_or_capture(
        &self,
        session: &dyn BrowserSession,
    ) -> Result<CookieSync, CookieStoreError> {
        if !self.exists() {
            let captured = self.save(session).await?;
            info!("Captured {} cookies to {}", captured, self.path.display());
            return Ok(CookieSync::Captured(captured));
        }

        let url = session.current_url().await?;
        let cookies = self.cookies_for(&url)?;
        debug!("Restoring {} cookies for {}", cookies.len(), url);
        session.set_cookies(&cookies).await?;
        info!("Restored {} cookies from {}", cookies.len(), self.path.display());
        Ok(CookieSync::Restored(cookies.len()))
    }

    /// Write the session's current cookies. Returns how many were written.
    pub async fn save(&self, session: &dyn BrowserSession) -> Result<usize, CookieStoreError> {
        let cookies = session.get_cookies().await?;
        self.write(&cookies)?;
        debug!("Saved {} cookies to {}", cookies.len(), self.path.display());
        Ok(cookies.len())
    }
}

#[cfg(test)]
#[path = "cookies_tests.rs"]
mod tests;

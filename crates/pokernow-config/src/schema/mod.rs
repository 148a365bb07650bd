//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Shared default helper.
pub(crate) fn default_true() -> bool {
    true
}

/// Base directory for state written by the watcher (`~/.pokernow`).
pub fn pokernow_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".pokernow"))
        .unwrap_or_else(|| PathBuf::from(".pokernow"))
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Browser (Chrome with remote debugging) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Run a launched Chrome headless.
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Launch Chrome when nothing listens on the debug port.
    #[serde(default = "default_true")]
    pub launch: bool,

    /// Explicit Chrome executable; searched in well-known locations otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Chrome user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: default_true(),
            launch: default_true(),
            chrome_path: None,
            profile_dir: None,
        }
    }
}

impl BrowserConfig {
    /// CDP HTTP endpoint.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }

    /// Profile directory, defaulting under `~/.pokernow`.
    pub fn profile_dir(&self) -> PathBuf {
        self.profile_dir
            .clone()
            .unwrap_or_else(|| pokernow_dir().join("browser-profile"))
    }
}

fn default_debug_port() -> u16 {
    9222
}

/// Session persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where session cookies are stored between runs.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_path: default_cookie_path(),
        }
    }
}

fn default_cookie_path() -> PathBuf {
    pokernow_dir().join("cookies.json")
}

/// Polling loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between two polls.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,

    /// Total run time of the watch loop.
    #[serde(default = "default_budget")]
    pub budget_seconds: u64,

    /// Bounded wait for a single element (fold confirmation etc.).
    #[serde(default = "default_element_timeout")]
    pub element_timeout_seconds: u64,

    /// Bounded wait for the table to render after navigation.
    #[serde(default = "default_table_load_timeout")]
    pub table_load_timeout_seconds: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
            budget_seconds: default_budget(),
            element_timeout_seconds: default_element_timeout(),
            table_load_timeout_seconds: default_table_load_timeout(),
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.budget_seconds)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_seconds)
    }

    pub fn table_load_timeout(&self) -> Duration {
        Duration::from_secs(self.table_load_timeout_seconds)
    }
}

fn default_interval() -> u64 {
    5
}

fn default_budget() -> u64 {
    60
}

fn default_element_timeout() -> u64 {
    10
}

fn default_table_load_timeout() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for rolling log files.
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Whether to write log files at all.
    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: default_log_dir(),
            file: default_true(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    pokernow_dir().join("logs")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

//! # PokerNow Browser
//!
//! Chrome automation for the PokerNow table watcher over the Chrome DevTools
//! Protocol.
//!
//! - [`cdp`]: WebSocket CDP client and page sessions
//! - [`BrowserManager`]: finds, launches and connects to Chrome
//! - [`CdpPage`]: implements [`DomAccessor`](pokernow_protocols::DomAccessor)
//!   and [`BrowserSession`](pokernow_protocols::BrowserSession)
//! - [`CookieStore`]: session cookies persisted between runs

pub mod cdp;
mod cookies;
mod manager;
mod page;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use cookies::{CookieStore, CookieStoreError, CookieSync};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
pub use page::CdpPage;

//! Chrome DevTools Protocol (CDP) client.
//!
//! Connects to Chrome over WebSocket and speaks the CDP JSON-RPC protocol.
//!
//! ## Usage
//!
//! 1. Start Chrome with remote debugging:
//!    ```bash
//!    chrome --remote-debugging-port=9222
//!    ```
//!
//! 2. Connect and attach a page:
//!    ```rust,ignore
//!    let client = CdpClient::connect("http://localhost:9222").await?;
//!    let page = client.new_page(None).await?;
//!    page.navigate("https://www.pokernow.club/games/pglXyz").await?;
//!    ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;

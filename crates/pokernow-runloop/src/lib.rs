//! # PokerNow RunLoop
//!
//! A scheduler with a single periodic task.
//!
//! ```text
//!   ┌──────────┐   ok / recoverable error    ┌──────────────────────┐
//!   │ on_poll  │ ──────────────────────────► │ sleep(interval)      │
//!   └──────────┘                             │   or cancellation    │
//!        ▲                                   └──────────┬───────────┘
//!        └──────────── budget left ◄────────────────────┘
//! ```
//!
//! A poll never overlaps the next one. The loop ends when the run budget is
//! spent, when the [`CancellationToken`](tokio_util::sync::CancellationToken)
//! fires, or when a handler reports a fatal error.
//!
//! One-shot work around the loop (page setup, a single table action) is
//! raced against the same token with [`until_cancelled`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use async_trait::async_trait;
//! use pokernow_runloop::{PollError, PollHandler, PollLoop};
//! use tokio_util::sync::CancellationToken;
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl PollHandler for Printer {
//!     async fn on_poll(&mut self, cycle: u64) -> Result<(), PollError> {
//!         println!("cycle {}", cycle);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let poll_loop = PollLoop::new(Duration::from_secs(5), Duration::from_secs(60));
//!     let report = poll_loop.run(&mut Printer, CancellationToken::new()).await;
//!     println!("{}", report);
//! }
//! ```

pub mod cancel;
pub mod error;
pub mod poll_loop;

pub use cancel::until_cancelled;
pub use error::PollError;
pub use poll_loop::{PollHandler, PollLoop, PollReport, StopReason};

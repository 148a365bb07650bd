//! Chrome process and connection management.
//!
//! Attaches to a Chrome already listening on the debug port, or launches one
//! with a dedicated profile so the PokerNow login survives restarts.

mod manager_core;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;

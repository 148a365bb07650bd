//! # PokerNow Protocols
//!
//! Interface definitions shared by the table model and the browser backend.
//! Contains only traits and value types - no implementations.
//!
//! ## Core Traits
//!
//! - [`DomAccessor`] - Read/write primitives over the rendered page
//! - [`BrowserSession`] - Page navigation and cookie access

pub mod dom;
pub mod error;
pub mod session;

pub use dom::{DomAccessor, ElementHandle};
pub use error::DomError;
pub use session::{BrowserSession, Cookie};

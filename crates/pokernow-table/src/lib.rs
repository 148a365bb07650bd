//! # PokerNow Table
//!
//! Derives a normalized table model from the PokerNow page.
//!
//! ## Pipeline
//!
//! ```text
//! DomAccessor ──► SeatReader ──► [RawSeat] ──► PositionEngine ──► [SeatPosition]
//!                                                     │
//!                         TableStateBuilder ◄─────────┘ ──► TableSnapshot
//! ```
//!
//! Everything produced here is rebuilt from scratch on every poll. Nothing is
//! cached between two calls to [`TableStateBuilder::build`].

pub mod action;
pub mod card;
pub mod player;
pub mod position;
pub mod seat;
pub mod selectors;
pub mod snapshot;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use action::{Action, ActionError, ActionHelper, ActionOutcome};
pub use card::{Card, Rank, Suit};
pub use player::{PlayerInfo, PlayerStatus};
pub use position::{PositionEngine, PositionTable, SeatPosition, POSITION_TABLE};
pub use seat::{RawSeat, SeatReader};
pub use snapshot::{TableSnapshot, TableStateBuilder};

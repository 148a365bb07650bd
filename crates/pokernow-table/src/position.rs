//! Dealer-relative position assignment.
//!
//! Positions are computed among active seats only. The dealer button points
//! at a raw (unfiltered) seat index, so the engine first re-locates the
//! dealer inside the filtered list and then walks the ring from there:
//!
//! ```text
//! relative:   0    1   2   3    4      5   6   7   8..
//! number:     7    0   1   2    3      4   5   6   relative
//! name:      BTN  SB  BB  UTG  UTG+1  LJ  HJ  CO  P<relative>
//! ```
//!
//! Every unresolved case degrades to a default. The engine never fails: the
//! page is polled continuously and may be read mid-render.

use std::fmt;

use tracing::debug;

use crate::seat::RawSeat;

/// Position number of the button.
pub const BTN: usize = 7;
/// Position number of the small blind.
pub const SB: usize = 0;
/// Position number of the big blind.
pub const BB: usize = 1;

/// Immutable bidirectional mapping between position numbers and names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionTable {
    names: [&'static str; 8],
}

/// The fixed table used by PokerNow seating.
pub const POSITION_TABLE: PositionTable = PositionTable {
    names: ["SB", "BB", "UTG", "UTG+1", "LJ", "HJ", "CO", "BTN"],
};

impl PositionTable {
    /// Name of a position number, `None` outside the fixed table.
    pub fn name(&self, number: usize) -> Option<&'static str> {
        self.names.get(number).copied()
    }

    /// Position number of a name, `None` for unknown or overflow names.
    pub fn number(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }

    /// Number of named positions.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Label for any position number, using `P<n>` beyond the fixed table.
    pub fn label(&self, number: usize) -> String {
        match self.name(number) {
            Some(name) => name.to_string(),
            None => format!("P{}", number),
        }
    }
}

impl Default for PositionTable {
    fn default() -> Self {
        POSITION_TABLE
    }
}

/// Position assigned to one active seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatPosition {
    /// Raw DOM index of the seat.
    pub dom_index: usize,
    /// Index of the seat in the filtered active list.
    pub active_index: usize,
    /// Clockwise offset from the button (0 = button).
    pub relative: usize,
    pub position_number: usize,
    pub position_name: String,
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (seat {})", self.position_name, self.dom_index + 1)
    }
}

/// Result of one assignment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    /// Index of the dealer within the active seats; 0 when it could not be located.
    pub dealer_active_index: usize,
    /// One entry per active seat, in active (DOM) order.
    pub positions: Vec<SeatPosition>,
}

/// Computes dealer-relative positions for active seats.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionEngine {
    table: PositionTable,
}

impl PositionEngine {
    pub fn new() -> Self {
        Self {
            table: POSITION_TABLE,
        }
    }

    pub fn with_table(table: PositionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    /// Keep only occupied seats with a known stack, preserving DOM order.
    pub fn active_seats<'a>(&self, seats: &'a [RawSeat]) -> Vec<&'a RawSeat> {
        seats.iter().filter(|seat| seat.is_active()).collect()
    }

    /// Raw index of the dealer: the first seat carrying the marker.
    pub fn dealer_raw_index(&self, seats: &[RawSeat]) -> Option<usize> {
        seats
            .iter()
            .find(|seat| seat.has_dealer_marker)
            .map(|seat| seat.dom_index)
    }

    /// Index within `active` of the seat whose raw index is `dealer_raw_index`.
    ///
    /// Falls back to 0 when the marker is absent or sits on an inactive seat.
    pub fn dealer_active_index(&self, active: &[&RawSeat], dealer_raw_index: Option<usize>) -> usize {
        dealer_raw_index
            .and_then(|raw| active.iter().position(|seat| seat.dom_index == raw))
            .unwrap_or_else(|| {
                debug!(
                    "Dealer raw index {:?} matches no active seat, using active seat 0",
                    dealer_raw_index
                );
                0
            })
    }

    /// Position number for a clockwise offset from the button.
    pub fn position_number(&self, relative: usize) -> usize {
        match relative {
            0 => BTN,
            1 => SB,
            2 => BB,
            r if r < BTN + 1 => r - 1,
            r => r,
        }
    }

    /// Assign positions to already filtered active seats.
    pub fn assign_positions(
        &self,
        active: &[&RawSeat],
        dealer_raw_index: Option<usize>,
    ) -> Assignment {
        let count = active.len();
        if count == 0 {
            return Assignment::default();
        }

        let dealer_active_index = self.dealer_active_index(active, dealer_raw_index);

        let positions = active
            .iter()
            .enumerate()
            .map(|(active_index, seat)| {
                let relative = (active_index + count - dealer_active_index) % count;
                let position_number = self.position_number(relative);
                SeatPosition {
                    dom_index: seat.dom_index,
                    active_index,
                    relative,
                    position_number,
                    position_name: self.table.label(position_number),
                }
            })
            .collect();

        Assignment {
            dealer_active_index,
            positions,
        }
    }

    /// Filter `seats`, locate the dealer from the markers and assign positions.
    pub fn assign(&self, seats: &[RawSeat]) -> Assignment {
        let active = self.active_seats(seats);
        let dealer_raw_index = self.dealer_raw_index(seats);
        self.assign_positions(&active, dealer_raw_index)
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod tests;

//! Player model derived from an active seat and its position.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::SeatPosition;
use crate::seat::RawSeat;
use crate::selectors;

/// Player status as shown by the seat classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    Current,
    Folded,
    Offline,
}

impl PlayerStatus {
    /// Derive the status from seat classes.
    ///
    /// Priority: Current, then Folded, then Offline, otherwise Active.
    pub fn from_classes<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = false;
        let mut folded = false;
        let mut offline = false;
        for class in classes {
            match class {
                selectors::CLASS_CURRENT => current = true,
                selectors::CLASS_FOLDED => folded = true,
                selectors::CLASS_OFFLINE => offline = true,
                _ => {}
            }
        }

        if current {
            PlayerStatus::Current
        } else if folded {
            PlayerStatus::Folded
        } else if offline {
            PlayerStatus::Offline
        } else {
            PlayerStatus::Active
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerStatus::Active => "Active",
            PlayerStatus::Current => "Current",
            PlayerStatus::Folded => "Folded",
            PlayerStatus::Offline => "Offline",
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One active player of the current poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub stack: String,
    pub bet_value: String,
    pub status: PlayerStatus,
    /// Clockwise offset from the button (0 = button).
    pub position: usize,
    pub position_name: String,
    pub position_number: usize,
    /// Raw DOM index of the seat.
    pub seat_index: usize,
    pub sitting_out: bool,
    /// Last action label shown on the seat.
    pub action: Option<String>,
}

impl PlayerInfo {
    pub fn from_seat(seat: &RawSeat, position: &SeatPosition) -> Self {
        Self {
            name: seat.name.trim().to_string(),
            stack: seat.stack.clone(),
            bet_value: seat.bet_value.clone(),
            status: PlayerStatus::from_classes(seat.status_classes.iter().map(String::as_str)),
            position: position.relative,
            position_name: position.position_name.clone(),
            position_number: position.position_number,
            seat_index: seat.dom_index,
            sitting_out: seat.has_class(selectors::CLASS_SITTING_OUT),
            action: seat.action_text.clone(),
        }
    }

    /// Bet as a number; unparsable bets count as zero.
    pub fn bet_amount(&self) -> f64 {
        parse_chips(&self.bet_value).unwrap_or(0.0)
    }

    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }
}

/// Parse a chip amount such as `"1,250"` or `"12.5"`.
pub fn parse_chips(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok()
}

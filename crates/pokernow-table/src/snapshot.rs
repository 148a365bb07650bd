//! Table snapshot construction.

use pokernow_protocols::{DomAccessor, DomError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::Card;
use crate::player::PlayerInfo;
use crate::position::PositionEngine;
use crate::seat::SeatReader;
use crate::selectors;

/// Complete table state of one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Active players ordered by position number.
    pub players: Vec<PlayerInfo>,
    pub blinds: Vec<String>,
    pub pot: Option<String>,
    /// Empty when no seat is currently deciding.
    pub current_player_name: String,
    pub community_cards: Vec<Card>,
    pub your_cards: Vec<Card>,
    /// Index of the dealer within the active seats.
    pub dealer_index: usize,
}

impl TableSnapshot {
    pub fn current_player(&self) -> Option<&PlayerInfo> {
        if self.current_player_name.is_empty() {
            return None;
        }
        self.players
            .iter()
            .find(|p| p.name == self.current_player_name)
    }

    pub fn button(&self) -> Option<&PlayerInfo> {
        self.players.iter().find(|p| p.position == 0)
    }

    /// Highest bet currently in front of a player.
    pub fn max_bet(&self) -> f64 {
        self.players
            .iter()
            .map(PlayerInfo::bet_amount)
            .fold(0.0, f64::max)
    }
}

/// Builds a [`TableSnapshot`] from the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableStateBuilder {
    reader: SeatReader,
    engine: PositionEngine,
}

impl TableStateBuilder {
    pub fn new() -> Self {
        Self {
            reader: SeatReader::new(),
            engine: PositionEngine::new(),
        }
    }

    pub fn with_engine(engine: PositionEngine) -> Self {
        Self {
            reader: SeatReader::new(),
            engine,
        }
    }

    /// Read the page once and derive the snapshot.
    ///
    /// Optional parts default to empty values. Accessor failures are returned
    /// unchanged so the caller can skip the poll.
    pub async fn build(&self, dom: &dyn DomAccessor) -> Result<TableSnapshot, DomError> {
        let seats = self.reader.read_seats(dom).await?;
        let assignment = self.engine.assign(&seats);

        let mut players: Vec<PlayerInfo> = assignment
            .positions
            .iter()
            .filter_map(|position| {
                seats
                    .iter()
                    .find(|seat| seat.dom_index == position.dom_index)
                    .map(|seat| PlayerInfo::from_seat(seat, position))
            })
            .collect();
        players.sort_by_key(|p| p.position_number);

        debug!(
            "Built {} players from {} seats, dealer active index {}",
            players.len(),
            seats.len(),
            assignment.dealer_active_index
        );

        Ok(TableSnapshot {
            players,
            blinds: self.read_blinds(dom).await?,
            pot: self.read_pot(dom).await?,
            current_player_name: self.read_current_player(dom).await?,
            community_cards: self.read_cards(dom, selectors::COMMUNITY_CARDS).await?,
            your_cards: self.read_cards(dom, selectors::YOUR_CARDS).await?,
            dealer_index: assignment.dealer_active_index,
        })
    }

    async fn read_blinds(&self, dom: &dyn DomAccessor) -> Result<Vec<String>, DomError> {
        let mut blinds = Vec::new();
        for element in dom.query_all(selectors::BLIND_VALUES, None).await? {
            blinds.push(parse_stack_value(&dom.text(&element).await?));
        }
        Ok(blinds)
    }

    async fn read_pot(&self, dom: &dyn DomAccessor) -> Result<Option<String>, DomError> {
        let pot = dom.text_of(selectors::POT, None).await?;
        Ok(Some(pot).filter(|p| !p.is_empty()))
    }

    async fn read_current_player(&self, dom: &dyn DomAccessor) -> Result<String, DomError> {
        match dom.query(selectors::CURRENT_SEAT, None).await? {
            Some(seat) => dom.text_of(selectors::SEAT_NAME, Some(&seat)).await,
            None => Ok(String::new()),
        }
    }

    /// Decode face-up cards matching `selector`.
    async fn read_cards(&self, dom: &dyn DomAccessor, selector: &str) -> Result<Vec<Card>, DomError> {
        let mut cards = Vec::new();
        for element in dom.query_all(selector, None).await? {
            let classes = dom.attr(&element, "class").await?.unwrap_or_default();
            if classes
                .split_whitespace()
                .any(|c| c == selectors::HIDDEN_CARD_CLASS)
            {
                continue;
            }
            cards.push(Card::decode_class_attr(&classes));
        }
        Ok(cards)
    }
}

/// Strip the `+<increment>` suffix PokerNow appends to some chip values.
pub fn parse_stack_value(value: &str) -> String {
    value.split('+').next().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;

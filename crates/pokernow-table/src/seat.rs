//! Seat snapshot reading.
//!
//! [`SeatReader`] turns every `.table-player` element into a [`RawSeat`] in
//! DOM order. It does not interpret ordering: the DOM order is a visual order,
//! not the play order, and may change between polls.

use std::collections::BTreeSet;

use pokernow_protocols::{DomAccessor, DomError, ElementHandle};
use tracing::debug;

use crate::selectors;

/// Stack text used when a seat shows no stack.
pub const UNKNOWN_STACK: &str = "Unknown";

/// Name prefix PokerNow uses for unclaimed seats.
const PLACEHOLDER_NAME_PREFIX: &str = "Player";

/// Raw attributes of one visual seat slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSeat {
    pub dom_index: usize,
    pub name: String,
    pub stack: String,
    pub bet_value: String,
    pub status_classes: BTreeSet<String>,
    pub has_dealer_marker: bool,
    pub action_text: Option<String>,
}

impl RawSeat {
    /// An empty slot at `dom_index`, carrying the documented defaults.
    pub fn empty(dom_index: usize) -> Self {
        Self {
            dom_index,
            name: String::new(),
            stack: UNKNOWN_STACK.to_string(),
            bet_value: "0".to_string(),
            status_classes: BTreeSet::new(),
            has_dealer_marker: false,
            action_text: None,
        }
    }

    /// Whether the seat is occupied by a real player with a known stack.
    pub fn is_active(&self) -> bool {
        let name = self.name.trim();
        !name.is_empty()
            && !name.starts_with(PLACEHOLDER_NAME_PREFIX)
            && !self.stack.is_empty()
            && self.stack != UNKNOWN_STACK
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.status_classes.contains(class)
    }
}

/// Reads [`RawSeat`]s from the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeatReader;

impl SeatReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every seat slot in DOM order.
    ///
    /// Missing sub-elements fall back to defaults. Only accessor failures
    /// are returned as errors.
    pub async fn read_seats(&self, dom: &dyn DomAccessor) -> Result<Vec<RawSeat>, DomError> {
        let elements = dom.query_all(selectors::SEAT, None).await?;
        let table_dealer = self.table_dealer_index(dom).await?;

        let mut seats = Vec::with_capacity(elements.len());
        for (dom_index, element) in elements.iter().enumerate() {
            let mut seat = self.read_seat(dom, element, dom_index).await?;
            if table_dealer == Some(dom_index) {
                seat.has_dealer_marker = true;
            }
            debug!(
                "Seat {}: name={:?} stack={:?} dealer={}",
                dom_index + 1,
                seat.name,
                seat.stack,
                seat.has_dealer_marker
            );
            seats.push(seat);
        }

        Ok(seats)
    }

    async fn read_seat(
        &self,
        dom: &dyn DomAccessor,
        element: &ElementHandle,
        dom_index: usize,
    ) -> Result<RawSeat, DomError> {
        let mut seat = RawSeat::empty(dom_index);

        seat.name = dom.text_of(selectors::SEAT_NAME, Some(element)).await?;

        let stack = dom.text_of(selectors::SEAT_STACK, Some(element)).await?;
        if !stack.is_empty() {
            seat.stack = stack;
        }

        let bet = dom.text_of(selectors::SEAT_BET, Some(element)).await?;
        if !bet.is_empty() {
            seat.bet_value = bet;
        }

        seat.status_classes = dom.class_list(element).await?.into_iter().collect();
        seat.has_dealer_marker = dom
            .query(selectors::DEALER_BUTTON, Some(element))
            .await?
            .is_some();
        seat.action_text = self.read_action(dom, element).await?;

        Ok(seat)
    }

    async fn read_action(
        &self,
        dom: &dyn DomAccessor,
        element: &ElementHandle,
    ) -> Result<Option<String>, DomError> {
        for selector in [selectors::SEAT_ACTION, selectors::SEAT_ACTION_BUTTONS] {
            if let Some(node) = dom.query(selector, Some(element)).await? {
                let text = dom.text(&node).await?;
                return Ok(Some(text).filter(|t| !t.is_empty()));
            }
        }
        Ok(None)
    }

    /// Raw seat index pointed at by the table-level dealer button.
    ///
    /// The button's `dealer-position-<N>` class is 1-based.
    pub async fn table_dealer_index(&self, dom: &dyn DomAccessor) -> Result<Option<usize>, DomError> {
        let Some(button) = dom.query(selectors::DEALER_BUTTON, None).await? else {
            debug!("Dealer button not found");
            return Ok(None);
        };

        let index = dom
            .class_list(&button)
            .await?
            .iter()
            .find_map(|class| parse_dealer_class(class));
        debug!("Dealer button at raw index {:?}", index);
        Ok(index)
    }
}

/// Parse `dealer-position-<N>` into the 0-based raw index `N - 1`.
pub fn parse_dealer_class(class: &str) -> Option<usize> {
    class
        .strip_prefix(selectors::DEALER_POSITION_PREFIX)?
        .parse::<usize>()
        .ok()?
        .checked_sub(1)
}

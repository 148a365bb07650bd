//! CSS selectors of the PokerNow table page.

/// One element per visual seat slot, occupied or not.
pub const SEAT: &str = ".table-player";
pub const SEAT_NAME: &str = ".table-player-name a";
pub const SEAT_STACK: &str = ".table-player-stack .chips-value";
pub const SEAT_BET: &str = ".table-player-bet-value .chips-value";
pub const SEAT_ACTION: &str = ".player-action";
pub const SEAT_ACTION_BUTTONS: &str = ".table-player-action-buttons";

/// Dealer button. Carries a `dealer-position-<N>` class with a 1-based seat number.
pub const DEALER_BUTTON: &str = ".dealer-button-ctn";
pub const DEALER_POSITION_PREFIX: &str = "dealer-position-";

pub const BLIND_VALUES: &str = ".blind-value-ctn .chips-value";
pub const POT: &str = ".table-pot-size .chips-value";
pub const CURRENT_SEAT: &str = ".table-player.decision-current";
pub const COMMUNITY_CARDS: &str = ".table-cards .card-container";
pub const YOUR_CARDS: &str = ".table-player.player-hover .table-player-cards .card-container";
pub const HIDDEN_CARD_CLASS: &str = "card-hidden";

pub const ACTION_CALL: &str = ".game-decisions-ctn .button-1.call";
pub const ACTION_RAISE: &str = ".game-decisions-ctn .button-1.raise";
pub const ACTION_CHECK: &str = ".game-decisions-ctn .button-1.check";
pub const ACTION_FOLD: &str = ".game-decisions-ctn .button-1.fold";
pub const RAISE_INPUT: &str = ".raise-controller-form .value-input-ctn .value";
pub const RAISE_CONFIRM: &str = ".raise-controller-form .bet";
pub const FOLD_CONFIRM: &str = ".alert-1-buttons button.middle-gray";

/// Seat status classes.
pub const CLASS_CURRENT: &str = "decision-current";
pub const CLASS_FOLDED: &str = "fold";
pub const CLASS_OFFLINE: &str = "offline";
pub const CLASS_SITTING_OUT: &str = "player-sitting-out";

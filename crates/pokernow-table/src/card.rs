//! Card decoding from PokerNow card classes.
//!
//! A rendered card carries two relevant classes: `card-s-<X>` for the rank
//! and exactly one of `card-c`, `card-d`, `card-h`, `card-s` for the suit.

use std::fmt;

use serde::{Deserialize, Serialize};

const RANK_PREFIX: &str = "card-s-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Parse the `<X>` of a `card-s-<X>` token.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "T" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Parse a whole suit class token.
    pub fn from_class(token: &str) -> Option<Self> {
        match token {
            "card-c" => Some(Suit::Clubs),
            "card-d" => Some(Suit::Diamonds),
            "card-h" => Some(Suit::Hearts),
            "card-s" => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

/// A decoded card. `Unknown` means the page did not give enough information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Known { rank: Rank, suit: Suit },
    Unknown,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card::Known { rank, suit }
    }

    /// Decode a card from its class tokens. Later tokens win over earlier ones.
    pub fn decode<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rank = None;
        let mut suit = None;

        for token in tokens {
            if let Some(code) = token.strip_prefix(RANK_PREFIX) {
                rank = Rank::from_code(code);
            } else if let Some(s) = Suit::from_class(token) {
                suit = Some(s);
            }
        }

        match (rank, suit) {
            (Some(rank), Some(suit)) => Card::Known { rank, suit },
            _ => Card::Unknown,
        }
    }

    /// Decode a raw `class` attribute value.
    pub fn decode_class_attr(class_attr: &str) -> Self {
        Self::decode(class_attr.split_whitespace())
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Card::Known { .. })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Known { rank, suit } => write!(f, "{} of {}", rank.name(), suit.name()),
            Card::Unknown => write!(f, "Unknown Card"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_code(rank: Rank) -> &'static str {
        match rank {
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            other => other.name(),
        }
    }

    fn suit_class(suit: Suit) -> &'static str {
        match suit {
            Suit::Clubs => "card-c",
            Suit::Diamonds => "card-d",
            Suit::Hearts => "card-h",
            Suit::Spades => "card-s",
        }
    }

    #[test]
    fn test_decode_every_rank_and_suit() {
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                let rank_token = format!("card-s-{}", rank_code(rank));
                let tokens = ["card-container", rank_token.as_str(), suit_class(suit)];
                let card = Card::decode(tokens);
                assert_eq!(card, Card::new(rank, suit));
                assert_eq!(card.to_string(), format!("{} of {}", rank.name(), suit.name()));
            }
        }
    }

    #[test]
    fn test_decode_lowercase_rank() {
        let card = Card::decode_class_attr("card-container card-s-k card-h");
        assert_eq!(card.to_string(), "King of Hearts");
    }

    #[test]
    fn test_ten_is_rendered_as_number() {
        let card = Card::decode_class_attr("card-s-T card-d");
        assert_eq!(card.to_string(), "10 of Diamonds");
    }

    #[test]
    fn test_spades_suit_token_not_mistaken_for_rank() {
        let card = Card::decode_class_attr("card-s card-s-A");
        assert_eq!(card, Card::new(Rank::Ace, Suit::Spades));
    }

    #[test]
    fn test_missing_suit_is_unknown() {
        let card = Card::decode_class_attr("card-container card-s-9");
        assert_eq!(card, Card::Unknown);
        assert_eq!(card.to_string(), "Unknown Card");
    }

    #[test]
    fn test_missing_rank_is_unknown() {
        let card = Card::decode_class_attr("card-container card-h");
        assert!(!card.is_known());
    }

    #[test]
    fn test_unrecognized_rank_is_unknown() {
        let card = Card::decode_class_attr("card-s-Z card-c");
        assert_eq!(card, Card::Unknown);
    }

    #[test]
    fn test_empty_tokens_is_unknown() {
        assert_eq!(Card::decode_class_attr(""), Card::Unknown);
    }
}

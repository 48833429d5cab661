use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A denomination. Ordered low to high, notrump on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strain {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    Notrump,
}

impl Strain {
    pub const ALL: [Strain; 5] = [
        Strain::Clubs,
        Strain::Diamonds,
        Strain::Hearts,
        Strain::Spades,
        Strain::Notrump,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        match self.to_suit() {
            Some(suit) => suit.to_char(),
            None => 'N',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Strain::Notrump),
            other => Suit::from_char(other).map(Strain::from_suit),
        }
    }

    /// Textual form used in call notation: a suit symbol or "NT".
    pub fn notation(self) -> String {
        match self.to_suit() {
            Some(suit) => suit.symbol().to_string(),
            None => "NT".to_string(),
        }
    }

    pub fn from_suit(suit: Suit) -> Self {
        match suit {
            Suit::Clubs => Strain::Clubs,
            Suit::Diamonds => Strain::Diamonds,
            Suit::Hearts => Strain::Hearts,
            Suit::Spades => Strain::Spades,
        }
    }

    pub fn to_suit(self) -> Option<Suit> {
        match self {
            Strain::Clubs => Some(Suit::Clubs),
            Strain::Diamonds => Some(Suit::Diamonds),
            Strain::Hearts => Some(Suit::Hearts),
            Strain::Spades => Some(Suit::Spades),
            Strain::Notrump => None,
        }
    }

    pub fn is_major(self) -> bool {
        self.to_suit().is_some_and(Suit::is_major)
    }

    pub fn is_minor(self) -> bool {
        self.to_suit().is_some_and(Suit::is_minor)
    }

    /// Lowest level at which a contract in this strain scores game.
    pub fn game_level(self) -> u8 {
        match self {
            Strain::Notrump => 3,
            Strain::Hearts | Strain::Spades => 4,
            Strain::Clubs | Strain::Diamonds => 5,
        }
    }
}

impl From<Suit> for Strain {
    fn from(suit: Suit) -> Self {
        Strain::from_suit(suit)
    }
}

impl fmt::Display for Strain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strain_parsing() {
        assert_eq!(Strain::from_char('S'), Some(Strain::Spades));
        assert_eq!(Strain::from_char('n'), Some(Strain::Notrump));
        assert_eq!(Strain::from_char('♥'), Some(Strain::Hearts));
        assert_eq!(Strain::from_char('Z'), None);
    }

    #[test]
    fn test_strain_order() {
        assert!(Strain::Clubs < Strain::Diamonds);
        assert!(Strain::Spades < Strain::Notrump);
    }

    #[test]
    fn test_notation() {
        assert_eq!(Strain::Notrump.notation(), "NT");
        assert_eq!(Strain::Spades.notation(), "♠");
    }

    #[test]
    fn test_game_level() {
        assert_eq!(Strain::Notrump.game_level(), 3);
        assert_eq!(Strain::Hearts.game_level(), 4);
        assert_eq!(Strain::Clubs.game_level(), 5);
    }
}

use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Dense index in 0..52, clubs two first, spade ace last.
    pub fn id(self) -> u8 {
        self.suit.idx() as u8 * 13 + (self.rank as u8 - 2)
    }

    pub fn from_id(id: u8) -> Option<Self> {
        if id >= 52 {
            return None;
        }
        Some(Self {
            suit: Suit::ALL[(id / 13) as usize],
            rank: Rank::ALL[(id % 13) as usize],
        })
    }

    /// All 52 cards in id order.
    pub fn deck() -> Vec<Card> {
        (0..52).filter_map(Card::from_id).collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.symbol(), self.rank)
    }
}

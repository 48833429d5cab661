// cspell:ignore Jxxx AKQJ
use crate::card::Card;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// No singletons, no voids, max one doubleton (4-3-3-3, 4-4-3-2, 5-3-3-2)
    Balanced,
    /// One singleton OR two doubletons, no voids (5-4-2-2, 6-3-2-2)
    SemiBalanced,
    /// Everything else
    Unbalanced,
}

impl Shape {
    /// Classify a set of four suit lengths.
    pub fn classify(lengths: [u8; 4]) -> Shape {
        let longest = lengths.iter().copied().max().unwrap_or(0);
        let count = |n: u8| lengths.iter().filter(|&&l| l == n).count();
        let (voids, singletons, doubletons) = (count(0), count(1), count(2));

        if voids == 0 && singletons == 0 && doubletons <= 1 {
            Shape::Balanced
        } else if longest <= 6 && voids == 0 && (singletons == 1 || doubletons == 2) {
            Shape::SemiBalanced
        } else {
            Shape::Unbalanced
        }
    }
}

/// Per-suit card counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Distribution {
    lengths: [u8; 4],
}

impl Distribution {
    pub fn uniform(length: u8) -> Self {
        Self {
            lengths: [length; 4],
        }
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.lengths[suit.idx()]
    }

    pub fn set_length(&mut self, suit: Suit, length: u8) {
        self.lengths[suit.idx()] = length;
    }

    pub fn lengths(&self) -> [u8; 4] {
        self.lengths
    }

    pub fn total(&self) -> u8 {
        self.lengths.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a hand string in the format "Clubs.Diamonds.Hearts.Spades".
    pub fn parse(s: &str) -> Self {
        crate::io::hand_parser::parse_hand(s)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    fn holds(&self, suit: Suit, rank: Rank) -> bool {
        self.contains(Card::new(suit, rank))
    }

    pub fn hcp(&self) -> u8 {
        self.cards.iter().map(|c| c.rank.hcp()).sum()
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    pub fn distribution(&self) -> Distribution {
        let mut dist = Distribution::default();
        for suit in Suit::ALL {
            dist.set_length(suit, self.length(suit));
        }
        dist
    }

    pub fn shape(&self) -> Shape {
        Shape::classify(self.distribution().lengths())
    }

    pub fn is_balanced(&self) -> bool {
        self.shape() == Shape::Balanced
    }

    pub fn is_semi_balanced(&self) -> bool {
        self.shape() == Shape::SemiBalanced
    }

    /// Longest suit; ties go to the higher-ranking suit.
    pub fn longest_suit(&self) -> Suit {
        let mut best = Suit::Spades;
        for suit in Suit::ALL.iter().rev() {
            if self.length(*suit) > self.length(best) {
                best = *suit;
            }
        }
        best
    }

    /// All suits tied for the longest length, lowest first.
    pub fn longest_suits(&self) -> Vec<Suit> {
        let max_len = Suit::ALL.iter().map(|&s| self.length(s)).max().unwrap_or(0);
        Suit::ALL
            .iter()
            .copied()
            .filter(|&s| self.length(s) == max_len)
            .collect()
    }

    /// Count how many of the top N honors (A, K, Q, J, T) the hand holds in a suit.
    pub fn top_honors(&self, suit: Suit, n: u8) -> u8 {
        const HONOR_RANKS: [Rank; 5] = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten];
        HONOR_RANKS[..n.min(5) as usize]
            .iter()
            .filter(|&&r| self.holds(suit, r))
            .count() as u8
    }

    /// A stopper is A, Kx, Qxx, or Jxxx.
    pub fn has_stopper(&self, suit: Suit) -> bool {
        let len = self.length(suit);
        self.holds(suit, Rank::Ace)
            || (self.holds(suit, Rank::King) && len >= 2)
            || (self.holds(suit, Rank::Queen) && len >= 3)
            || (self.holds(suit, Rank::Jack) && len >= 4)
    }

    pub fn aces(&self) -> u8 {
        self.cards.iter().filter(|c| c.rank == Rank::Ace).count() as u8
    }

    pub fn kings(&self) -> u8 {
        self.cards.iter().filter(|c| c.rank == Rank::King).count() as u8
    }

    /// HCP plus shortness (with a trump fit) or length (without one).
    pub fn points(&self, trump: Option<Suit>) -> u8 {
        let hcp = self.hcp();
        match trump {
            Some(t) => {
                let shortness: u8 = Suit::ALL
                    .iter()
                    .filter(|&&s| s != t)
                    .map(|&s| match self.length(s) {
                        0 => 5,
                        1 => 3,
                        2 => 1,
                        _ => 0,
                    })
                    .sum();
                hcp + shortness
            }
            None => {
                let length: u8 = Suit::ALL
                    .iter()
                    .map(|&s| self.length(s).saturating_sub(4))
                    .sum();
                hcp + length
            }
        }
    }

    /// Quick tricks in halves: AK = 4, AQ = 3, A = 2, KQ = 2, Kx = 1.
    pub fn quick_trick_halves(&self) -> u8 {
        Suit::ALL
            .iter()
            .map(|&suit| {
                let ace = self.holds(suit, Rank::Ace);
                let king = self.holds(suit, Rank::King);
                let queen = self.holds(suit, Rank::Queen);
                match (ace, king, queen) {
                    (true, true, _) => 4,
                    (true, false, true) => 3,
                    (true, false, false) => 2,
                    (false, true, true) => 2,
                    (false, true, false) if self.length(suit) >= 2 => 1,
                    _ => 0,
                }
            })
            .sum()
    }

    /// Losing trick count: up to three losers per suit, one fewer for each of
    /// A, K, Q held among the top min(length, 3) positions.
    pub fn losing_trick_count(&self) -> u8 {
        Suit::ALL
            .iter()
            .map(|&suit| {
                let len = self.length(suit).min(3);
                let covered = [Rank::Ace, Rank::King, Rank::Queen][..len as usize]
                    .iter()
                    .filter(|&&r| self.holds(suit, r))
                    .count() as u8;
                len - covered
            })
            .sum()
    }

    pub fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| b.suit.cmp(&a.suit).then(b.rank.cmp(&a.rank)));
    }
}

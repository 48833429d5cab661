use crate::card::Card;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

/// Parses a hand string in the format "Clubs.Diamonds.Hearts.Spades".
///
/// Suits run in ascending rank order (C, D, H, S), which is the layout the
/// YAML test vectors use. Unknown characters (spot placeholders such as `x`)
/// are skipped.
pub fn parse_hand(s: &str) -> Hand {
    let cards = s
        .split('.')
        .zip(Suit::ALL)
        .flat_map(|(holding, suit)| {
            holding
                .chars()
                .filter_map(Rank::from_char)
                .map(move |rank| Card::new(suit, rank))
        })
        .collect();
    Hand::new(cards)
}

/// Inverse of [`parse_hand`]: ranks high to low within each suit.
pub fn format_hand(hand: &Hand) -> String {
    Suit::ALL
        .iter()
        .map(|&suit| {
            let mut ranks: Vec<Rank> = hand
                .cards
                .iter()
                .filter(|c| c.suit == suit)
                .map(|c| c.rank)
                .collect();
            ranks.sort_by(|a, b| b.cmp(a));
            ranks.into_iter().map(Rank::to_char).collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(".")
}

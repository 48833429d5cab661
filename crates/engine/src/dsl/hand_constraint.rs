// cspell:ignore Jxxx
//! Hand constraints shown by bidding rules

use crate::belief::{ShapeSignals, StrengthRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::{Hand, Shape, Suit};

/// Constraints that a hand must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandConstraint {
    /// Minimum high card points
    MinHcp(u8),
    /// Maximum high card points
    MaxHcp(u8),
    /// Minimum length in a specific suit
    MinLength(Suit, u8),
    /// Maximum length in a specific suit
    MaxLength(Suit, u8),
    /// Maximum unbalancedness allowed
    MaxUnbalancedness(Shape),
    /// Must have a stopper in the given suit (A, Kx, Qxx, or Jxxx)
    StopperIn(Suit),
    /// Good suit quality: 2 of the top 3 honors or 3 of the top 5
    GoodSuit(Suit),
    /// At least `n` cards in one of two suits
    LengthInEither(Suit, Suit, u8),
    /// Ace count, where a count of 4 is read as 0
    AceCount(u8),
    /// Partnership ace total within an inclusive range, given the step
    /// answer partner made. A zero answer means four when this hand has none.
    PartnershipAces { partner: u8, min: u8, max: u8 },
}

impl HandConstraint {
    /// Check whether a hand satisfies this constraint.
    pub fn check(&self, hand: &Hand) -> bool {
        match *self {
            HandConstraint::MinHcp(hcp) => hand.hcp() >= hcp,
            HandConstraint::MaxHcp(hcp) => hand.hcp() <= hcp,
            HandConstraint::MinLength(suit, len) => hand.length(suit) >= len,
            HandConstraint::MaxLength(suit, len) => hand.length(suit) <= len,
            HandConstraint::MaxUnbalancedness(max_shape) => hand.shape() <= max_shape,
            HandConstraint::StopperIn(suit) => hand.has_stopper(suit),
            HandConstraint::GoodSuit(suit) => {
                hand.top_honors(suit, 3) >= 2 || hand.top_honors(suit, 5) >= 3
            }
            HandConstraint::LengthInEither(a, b, len) => {
                hand.length(a) >= len || hand.length(b) >= len
            }
            HandConstraint::AceCount(n) => hand.aces() % 4 == n % 4,
            HandConstraint::PartnershipAces { partner, min, max } => {
                let own = hand.aces();
                let partner = if partner == 0 && own == 0 { 4 } else { partner };
                (min..=max).contains(&(own + partner))
            }
        }
    }

    /// Merge HCP and length bounds so each appears once.
    pub fn optimize(constraints: Vec<Self>) -> Vec<Self> {
        let mut min_hcp = 0;
        let mut max_hcp = StrengthRange::MAX_HCP;
        let mut min_lengths = BTreeMap::new();
        let mut max_lengths = BTreeMap::new();
        let mut other_constraints = Vec::new();

        for c in constraints {
            match c {
                HandConstraint::MinHcp(h) => min_hcp = min_hcp.max(h),
                HandConstraint::MaxHcp(h) => max_hcp = max_hcp.min(h),
                HandConstraint::MinLength(s, l) => {
                    let entry = min_lengths.entry(s).or_insert(0);
                    *entry = (*entry).max(l);
                }
                HandConstraint::MaxLength(s, l) => {
                    let entry = max_lengths.entry(s).or_insert(13);
                    *entry = (*entry).min(l);
                }
                _ if other_constraints.contains(&c) => {}
                _ => other_constraints.push(c),
            }
        }

        let mut optimised = Vec::new();
        if min_hcp > 0 {
            optimised.push(HandConstraint::MinHcp(min_hcp));
        }
        if max_hcp < StrengthRange::MAX_HCP {
            optimised.push(HandConstraint::MaxHcp(max_hcp));
        }
        for (suit, len) in min_lengths {
            optimised.push(HandConstraint::MinLength(suit, len));
        }
        for (suit, len) in max_lengths {
            optimised.push(HandConstraint::MaxLength(suit, len));
        }
        optimised.extend(other_constraints);
        optimised
    }

    /// The strength range implied by a set of constraints. Bounds the
    /// range cannot express (stoppers, aces, suit quality) are dropped.
    pub fn to_range(constraints: &[Self]) -> StrengthRange {
        let mut min = 0;
        let mut max = StrengthRange::MAX_HCP;
        let mut shape = ShapeSignals::default();
        for c in constraints {
            match *c {
                HandConstraint::MinHcp(h) => min = min.max(h.min(StrengthRange::MAX_HCP)),
                HandConstraint::MaxHcp(h) => max = max.min(h),
                HandConstraint::MinLength(s, l) => shape = shape.with_min_length(s, l),
                HandConstraint::MaxLength(s, l) => shape = shape.with_max_length(s, l),
                HandConstraint::MaxUnbalancedness(s) => shape = shape.with_max_shape(s),
                _ => {}
            }
        }
        let range = StrengthRange::hcp(min, max).unwrap_or_default();
        match ShapeSignals::default().narrow(&shape) {
            Some(shape) => range.with_shape(shape),
            None => range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimize_merges_bounds() {
        let merged = HandConstraint::optimize(vec![
            HandConstraint::MinHcp(6),
            HandConstraint::MinHcp(8),
            HandConstraint::MaxHcp(12),
            HandConstraint::MinLength(Suit::Hearts, 3),
            HandConstraint::MinLength(Suit::Hearts, 5),
            HandConstraint::StopperIn(Suit::Clubs),
            HandConstraint::StopperIn(Suit::Clubs),
        ]);
        assert_eq!(
            merged,
            vec![
                HandConstraint::MinHcp(8),
                HandConstraint::MaxHcp(12),
                HandConstraint::MinLength(Suit::Hearts, 5),
                HandConstraint::StopperIn(Suit::Clubs),
            ]
        );
    }

    #[test]
    fn to_range_keeps_points_and_shape() {
        let range = HandConstraint::to_range(&[
            HandConstraint::MinHcp(15),
            HandConstraint::MaxHcp(17),
            HandConstraint::MaxUnbalancedness(Shape::Balanced),
            HandConstraint::StopperIn(Suit::Spades),
        ]);
        assert_eq!((range.min(), range.max()), (15, 17));
        assert_eq!(range.shape().max_shape(), Some(Shape::Balanced));
    }

    #[test]
    fn ace_constraints() {
        let hand = Hand::parse("A32.A32.K32.Q432");
        assert!(HandConstraint::AceCount(2).check(&hand));
        assert!(!HandConstraint::AceCount(0).check(&hand));
        let one_shown = HandConstraint::PartnershipAces { partner: 1, min: 3, max: 4 };
        assert!(one_shown.check(&hand));
        assert!(!HandConstraint::PartnershipAces { partner: 1, min: 0, max: 2 }.check(&hand));
        let none = Hand::parse("K32.K32.K32.Q432");
        assert!(HandConstraint::AceCount(4).check(&none));
        // A zero answer opposite no aces can only be four.
        let zero_shown = HandConstraint::PartnershipAces { partner: 0, min: 4, max: 4 };
        assert!(zero_shown.check(&none));
        assert!(!HandConstraint::PartnershipAces { partner: 0, min: 0, max: 2 }.check(&none));
        assert!(!zero_shown.check(&hand));
    }

    #[test]
    fn good_suit_and_either_length() {
        let hand = Hand::parse("2.32.AQ432.KJT98");
        assert!(HandConstraint::GoodSuit(Suit::Hearts).check(&hand));
        assert!(HandConstraint::GoodSuit(Suit::Spades).check(&hand));
        assert!(!HandConstraint::GoodSuit(Suit::Diamonds).check(&hand));
        assert!(HandConstraint::LengthInEither(Suit::Hearts, Suit::Spades, 5).check(&hand));
        assert!(!HandConstraint::LengthInEither(Suit::Clubs, Suit::Diamonds, 3).check(&hand));
    }
}

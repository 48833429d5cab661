use crate::config::BeliefConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Hand, Shape, Suit};

/// Coarse shape information shown by the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSignals {
    min_length: [u8; 4],
    max_length: [u8; 4],
    max_shape: Option<Shape>,
}

impl Default for ShapeSignals {
    fn default() -> Self {
        Self {
            min_length: [0; 4],
            max_length: [13; 4],
            max_shape: None,
        }
    }
}

impl ShapeSignals {
    pub fn min_length(&self, suit: Suit) -> u8 {
        self.min_length[suit.idx()]
    }

    pub fn max_length(&self, suit: Suit) -> u8 {
        self.max_length[suit.idx()]
    }

    pub fn max_shape(&self) -> Option<Shape> {
        self.max_shape
    }

    pub fn with_min_length(mut self, suit: Suit, length: u8) -> Self {
        let slot = &mut self.min_length[suit.idx()];
        *slot = (*slot).max(length);
        self
    }

    pub fn with_max_length(mut self, suit: Suit, length: u8) -> Self {
        let slot = &mut self.max_length[suit.idx()];
        *slot = (*slot).min(length);
        self
    }

    pub fn with_max_shape(mut self, shape: Shape) -> Self {
        self.max_shape = Some(self.max_shape.map_or(shape, |s| s.min(shape)));
        self
    }

    /// Intersection, or `None` when the signals contradict each other.
    pub fn narrow(&self, other: &ShapeSignals) -> Option<ShapeSignals> {
        let mut out = *self;
        for suit in Suit::ALL {
            out = out
                .with_min_length(suit, other.min_length(suit))
                .with_max_length(suit, other.max_length(suit));
        }
        if let Some(shape) = other.max_shape {
            out = out.with_max_shape(shape);
        }
        out.is_consistent().then_some(out)
    }

    fn is_consistent(&self) -> bool {
        let mins: u8 = self.min_length.iter().sum();
        let maxes: u8 = self.max_length.iter().sum();
        Suit::ALL
            .iter()
            .all(|&s| self.min_length(s) <= self.max_length(s))
            && mins <= 13
            && maxes >= 13
    }

    pub fn admits(&self, hand: &Hand) -> bool {
        Suit::ALL.iter().all(|&suit| {
            let len = hand.length(suit);
            len >= self.min_length(suit) && len <= self.max_length(suit)
        }) && self.max_shape.map_or(true, |shape| hand.shape() <= shape)
    }
}

/// Inferred HCP range for one seat, with whatever shape it has shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthRange {
    min: u8,
    max: u8,
    shape: ShapeSignals,
}

impl Default for StrengthRange {
    fn default() -> Self {
        Self::universal()
    }
}

impl StrengthRange {
    pub const MAX_HCP: u8 = 37;

    /// Every possible holding.
    pub fn universal() -> Self {
        Self {
            min: 0,
            max: Self::MAX_HCP,
            shape: ShapeSignals::default(),
        }
    }

    /// An HCP range; `None` when inverted or beyond the 37 HCP maximum.
    pub fn hcp(min: u8, max: u8) -> Option<Self> {
        (min <= max && max <= Self::MAX_HCP).then_some(Self {
            min,
            max,
            shape: ShapeSignals::default(),
        })
    }

    pub fn with_shape(mut self, shape: ShapeSignals) -> Self {
        self.shape = shape;
        self
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn width(&self) -> u8 {
        self.max - self.min
    }

    pub fn shape(&self) -> &ShapeSignals {
        &self.shape
    }

    pub fn is_universal(&self) -> bool {
        *self == Self::universal()
    }

    /// Intersect with another range. `None` if the result would be empty,
    /// in which case callers keep the prior.
    pub fn narrow(&self, other: &StrengthRange) -> Option<StrengthRange> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min > max {
            return None;
        }
        let shape = self.shape.narrow(&other.shape)?;
        Some(StrengthRange { min, max, shape })
    }

    pub fn contains(&self, hcp: u8) -> bool {
        (self.min..=self.max).contains(&hcp)
    }

    pub fn admits(&self, hand: &Hand) -> bool {
        self.contains(hand.hcp()) && self.shape.admits(hand)
    }

    /// Point estimate: the midpoint, or a conservative point near the
    /// bottom when the range is too wide to trust.
    pub fn estimate(&self, config: &BeliefConfig) -> f32 {
        let width = f32::from(self.width());
        if self.width() > config.wide_range_width {
            f32::from(self.min) + config.wide_range_bias * width
        } else {
            f32::from(self.min) + width / 2.0
        }
    }
}

impl fmt::Display for StrengthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} hcp", self.min, self.max)?;
        for suit in Suit::ALL.iter().rev() {
            let (lo, hi) = (self.shape.min_length(*suit), self.shape.max_length(*suit));
            match (lo, hi) {
                (0, 13) => {}
                (lo, 13) => write!(f, ", {}+{}", lo, suit.symbol())?,
                (0, hi) => write!(f, ", {}-{}", hi, suit.symbol())?,
                (lo, hi) => write!(f, ", {}-{}{}", lo, hi, suit.symbol())?,
            }
        }
        match self.shape.max_shape {
            Some(Shape::Balanced) => write!(f, ", balanced"),
            Some(Shape::SemiBalanced) => write!(f, ", semi-balanced"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowing_is_intersection() {
        let opening = StrengthRange::hcp(12, 21).unwrap();
        let limited = StrengthRange::hcp(15, 17).unwrap();
        let narrowed = opening.narrow(&limited).unwrap();
        assert_eq!((narrowed.min(), narrowed.max()), (15, 17));
        assert!(narrowed.width() <= opening.width());
    }

    #[test]
    fn inverted_narrowing_is_rejected() {
        let weak = StrengthRange::hcp(5, 10).unwrap();
        let strong = StrengthRange::hcp(22, 37).unwrap();
        assert_eq!(weak.narrow(&strong), None);
        assert_eq!(StrengthRange::hcp(10, 5), None);
        assert_eq!(StrengthRange::hcp(0, 40), None);
    }

    #[test]
    fn shape_contradiction_is_rejected() {
        let long = StrengthRange::universal()
            .with_shape(ShapeSignals::default().with_min_length(Suit::Hearts, 5));
        let short = StrengthRange::universal()
            .with_shape(ShapeSignals::default().with_max_length(Suit::Hearts, 3));
        assert_eq!(long.narrow(&short), None);

        let too_many = ShapeSignals::default()
            .with_min_length(Suit::Spades, 7)
            .with_min_length(Suit::Hearts, 7);
        assert_eq!(ShapeSignals::default().narrow(&too_many), None);
    }

    #[test]
    fn estimate_uses_midpoint_for_narrow_ranges() {
        let config = BeliefConfig::default();
        let notrump = StrengthRange::hcp(15, 17).unwrap();
        assert_eq!(notrump.estimate(&config), 16.0);
    }

    #[test]
    fn estimate_is_conservative_for_wide_ranges() {
        let config = BeliefConfig::default();
        let prior = StrengthRange::universal();
        assert_eq!(prior.estimate(&config), 0.25 * 37.0);
        let strong = StrengthRange::hcp(13, 37).unwrap();
        assert_eq!(strong.estimate(&config), 19.0);
    }

    #[test]
    fn admits_checks_points_and_shape() {
        let hand = Hand::parse("A2.K32.QJ432.K32");
        let range = StrengthRange::hcp(10, 15)
            .unwrap()
            .with_shape(ShapeSignals::default().with_min_length(Suit::Hearts, 5));
        assert!(range.admits(&hand));
        let balanced = range.with_shape(
            ShapeSignals::default()
                .with_min_length(Suit::Hearts, 5)
                .with_max_shape(Shape::Balanced),
        );
        assert!(balanced.admits(&hand));
        let spades = StrengthRange::universal()
            .with_shape(ShapeSignals::default().with_min_length(Suit::Spades, 4));
        assert!(!spades.admits(&hand));
    }

    #[test]
    fn display() {
        let range = StrengthRange::hcp(15, 17).unwrap().with_shape(
            ShapeSignals::default()
                .with_min_length(Suit::Spades, 5)
                .with_max_shape(Shape::Balanced),
        );
        assert_eq!(range.to_string(), "15-17 hcp, 5+♠, balanced");
    }
}

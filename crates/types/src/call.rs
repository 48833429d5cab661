use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One utterance in the auction.
///
/// The derived ordering puts the special calls first and orders bids by
/// level, then strain, which is exactly the auction's bid order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallParseError {
    #[error("empty call")]
    Empty,
    #[error("bid level must be 1-7 in {0:?}")]
    BadLevel(String),
    #[error("unknown denomination in {0:?}")]
    BadStrain(String),
}

impl Call {
    /// Checked bid constructor; `None` for levels outside 1..=7.
    pub fn bid(level: u8, strain: Strain) -> Option<Call> {
        (1..=7)
            .contains(&level)
            .then_some(Call::Bid { level, strain })
    }

    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Call::Pass)
    }

    /// Returns the level of this call, if it's a bid.
    pub fn level(&self) -> Option<u8> {
        match self {
            Call::Bid { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Returns the strain of this call, if it's a bid.
    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            _ => None,
        }
    }

    /// Returns the suit of this call, if it's a suited bid.
    pub fn suit(&self) -> Option<Suit> {
        self.strain().and_then(|s| s.to_suit())
    }

    /// Position of a bid in the 35-step bidding ladder (1C = 0, 7NT = 34).
    pub fn bid_rank(&self) -> Option<u8> {
        match self {
            Call::Bid { level, strain } => Some((level - 1) * 5 + strain.idx() as u8),
            _ => None,
        }
    }

    /// True when both calls are bids and `self` is strictly higher.
    pub fn outranks(&self, other: &Call) -> bool {
        match (self.bid_rank(), other.bid_rank()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }

    /// A bid at or beyond game in its strain.
    pub fn is_game_bid(&self) -> bool {
        match self {
            Call::Bid { level, strain } => *level >= strain.game_level(),
            _ => false,
        }
    }

    pub fn is_slam_bid(&self) -> bool {
        self.level().is_some_and(|l| l >= 6)
    }

    pub fn is_grand_slam_bid(&self) -> bool {
        self.level() == Some(7)
    }

    /// Compact ASCII form: "P", "X", "XX", "1N", "4S".
    pub fn render(self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.to_char()),
        }
    }

    /// Display notation: "Pass", "X", "XX", "1NT", "4♠".
    pub fn notation(self) -> String {
        match self {
            Call::Pass => "Pass".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.notation()),
        }
    }
}

impl FromStr for Call {
    type Err = CallParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_uppercase();
        match s.as_str() {
            "" => return Err(CallParseError::Empty),
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "XX" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }

        let mut chars = s.chars();
        let level = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .filter(|l| (1..=7).contains(l))
            .ok_or_else(|| CallParseError::BadLevel(s.clone()))? as u8;
        let rest: String = chars.collect();
        let strain = match rest.as_str() {
            "NT" | "N" => Strain::Notrump,
            other => {
                let mut it = other.chars();
                match (it.next(), it.next()) {
                    (Some(c), None) => {
                        Strain::from_char(c).ok_or_else(|| CallParseError::BadStrain(s.clone()))?
                    }
                    _ => return Err(CallParseError::BadStrain(s.clone())),
                }
            }
        };
        Ok(Call::Bid { level, strain })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

use serde::Serialize;
use thiserror::Error;
use types::{Hand, Position, Strain};

/// Four hands, indexed by `Position::idx()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deal {
    hands: [Hand; 4],
}

impl Deal {
    pub fn new(hands: [Hand; 4]) -> Self {
        Self { hands }
    }

    pub fn hand(&self, position: Position) -> &Hand {
        &self.hands[position.idx()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn is_complete(&self) -> bool {
        self.hands.iter().all(|h| h.len() == 13)
    }

    /// Every seat holds thirteen cards.
    pub fn validate(&self) -> Result<(), OracleError> {
        for seat in Position::ALL {
            let cards = self.hand(seat).len();
            if cards != 13 {
                return Err(OracleError::IncompleteDeal { seat, cards });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("deal is incomplete: {seat} holds {cards} cards")]
    IncompleteDeal { seat: Position, cards: usize },
    #[error("trick oracle unavailable: {0}")]
    Unavailable(String),
    #[error("trick oracle failed: {0}")]
    Failed(String),
}

/// Estimates how many tricks `declarer` takes in `strain` on a full deal.
pub trait TrickOracle: Send + Sync {
    fn tricks(&self, deal: &Deal, declarer: Position, strain: Strain) -> Result<u8, OracleError>;
}

/// Table-free trick estimate from the declaring partnership's hands.
///
/// Suit contracts use the losing trick count (24 minus combined losers);
/// notrump uses one trick per three combined HCP, plus one.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickTrickOracle;

impl TrickOracle for QuickTrickOracle {
    fn tricks(&self, deal: &Deal, declarer: Position, strain: Strain) -> Result<u8, OracleError> {
        deal.validate()?;
        let (a, b) = (deal.hand(declarer), deal.hand(declarer.partner()));
        let tricks = match strain {
            Strain::Notrump => (a.hcp() + b.hcp()) / 3 + 1,
            _ => 24u8.saturating_sub(a.losing_trick_count() + b.losing_trick_count()),
        };
        Ok(tricks.min(13))
    }
}

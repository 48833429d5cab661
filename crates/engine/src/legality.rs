//! Turns the registry's candidate into a call that may legally be made.

use crate::config::LegalityConfig;
use crate::rules::Candidate;
use serde::Serialize;
use std::fmt;
use types::{Auction, Call};

/// Outcome of a legality correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Correction {
    /// Already legal.
    Legal { call: Call },
    /// Raised to the cheapest legal bid in the same strain, fewer than
    /// `escalation_cap` levels up.
    Escalated { from: Call, to: Call },
    /// No legal bid in the strain within the escalation cap.
    BeyondCap { from: Call },
    /// A double or redouble that is not available.
    IllegalSpecial { from: Call },
    /// The auction has already ended.
    AuctionOver { from: Call },
}

impl Correction {
    pub fn call(&self) -> Call {
        match *self {
            Correction::Legal { call } => call,
            Correction::Escalated { to, .. } => to,
            Correction::BeyondCap { .. }
            | Correction::IllegalSpecial { .. }
            | Correction::AuctionOver { .. } => Call::Pass,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, Correction::Legal { .. })
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correction::Legal { call } => write!(f, "{call} is legal"),
            Correction::Escalated { from, to } => {
                write!(f, "{from} is insufficient; raised to {to}")
            }
            Correction::BeyondCap { from } => {
                write!(f, "{from} is insufficient and no legal bid in its strain is within reach")
            }
            Correction::IllegalSpecial { from } => write!(f, "{from} is not available"),
            Correction::AuctionOver { from } => write!(f, "auction is over; {from} not made"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalityCorrector {
    escalation_cap: u8,
}

impl Default for LegalityCorrector {
    fn default() -> Self {
        Self::new(&LegalityConfig::default())
    }
}

impl LegalityCorrector {
    pub fn new(config: &LegalityConfig) -> Self {
        Self {
            escalation_cap: config.escalation_cap,
        }
    }

    /// The lowest bid strictly above the last bid, if any bid is still possible.
    pub fn minimum_legal(ledger: &Auction) -> Option<Call> {
        ledger.minimum_bid()
    }

    pub fn correct(&self, candidate: &Candidate, ledger: &Auction) -> Correction {
        let from = candidate.call;
        if ledger.is_finished() {
            return Correction::AuctionOver { from };
        }
        if ledger.is_legal_next(from) {
            return Correction::Legal { call: from };
        }
        let Call::Bid { level, strain } = from else {
            return Correction::IllegalSpecial { from };
        };

        // Reaching `level + escalation_cap` already counts as beyond the cap.
        let ceiling = level.saturating_add(self.escalation_cap).min(8);
        (level + 1..ceiling)
            .filter_map(|l| Call::bid(l, strain))
            .find(|&call| ledger.is_legal_next(call))
            .map(|to| Correction::Escalated { from, to })
            .unwrap_or(Correction::BeyondCap { from })
    }
}

//! Sample-based review of slam bids and competitive doubles.
//!
//! The resolver deals the unseen cards consistently with the belief model,
//! asks a [`TrickOracle`] how the contract plays on each deal, and replaces
//! the call only when the average clearly contradicts it. Any failure along
//! the way leaves the call as it was.

mod oracle;
mod sampler;

pub use oracle::{Deal, OracleError, QuickTrickOracle, TrickOracle};
pub use sampler::{seed_for, DealSampler, SamplingError};

use crate::belief::BeliefModel;
use crate::config::ConflictConfig;
use crate::rules::RuleMetadata;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use types::{Auction, Call, Hand, Position, Relation, Strain};

/// Combined strength band in which a competitive double is considered.
const DOUBLE_BAND: std::ops::RangeInclusive<u8> = 19..=25;

/// How much work one review may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationBudget {
    pub samples: usize,
    pub timeout: Duration,
}

impl From<&ConflictConfig> for VerificationBudget {
    fn from(config: &ConflictConfig) -> Self {
        Self {
            samples: config.samples,
            timeout: config.timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub call: Call,
    pub reason: String,
    /// Deals the oracle actually scored.
    pub samples: usize,
    /// Mean tricks for the side the question concerns.
    pub mean_tricks: Option<f32>,
    pub changed: bool,
}

impl Review {
    fn trusted(call: Call, reason: impl Into<String>) -> Self {
        Self {
            call,
            reason: reason.into(),
            samples: 0,
            mean_tricks: None,
            changed: false,
        }
    }
}

/// What the samples are asked.
#[derive(Debug, Clone, Copy)]
enum Question {
    /// Can we take `6 + level` tricks in `strain`?
    Slam {
        level: u8,
        strain: Strain,
        declarer: Position,
    },
    /// Can we beat the opponents' `level`-level contract?
    Penalty {
        level: u8,
        strain: Strain,
        declarer: Position,
    },
}

impl Question {
    fn play(&self) -> (Position, Strain) {
        match *self {
            Question::Slam {
                declarer, strain, ..
            }
            | Question::Penalty {
                declarer, strain, ..
            } => (declarer, strain),
        }
    }
}

#[derive(Clone)]
pub struct ConflictResolver {
    config: ConflictConfig,
    oracle: Option<Arc<dyn TrickOracle>>,
}

impl ConflictResolver {
    pub fn new(config: ConflictConfig, oracle: Option<Arc<dyn TrickOracle>>) -> Self {
        Self { config, oracle }
    }

    pub fn budget(&self) -> VerificationBudget {
        VerificationBudget::from(&self.config)
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    pub fn review(
        &self,
        call: Call,
        metadata: &RuleMetadata,
        hand: &Hand,
        belief: &BeliefModel,
        ledger: &Auction,
    ) -> Review {
        if metadata.is_artificial || metadata.is_asking_sequence_slot {
            return Review::trusted(call, "artificial call is not reviewed");
        }
        let Some(question) = self.question(call, hand, belief, ledger) else {
            return Review::trusted(call, "no review needed");
        };
        let Some(oracle) = self.oracle.as_deref() else {
            tracing::warn!(%call, "no trick oracle configured; degraded confidence");
            return Review::trusted(call, "no trick oracle; candidate trusted");
        };

        let budget = self.budget();
        let deadline = Instant::now() + budget.timeout;
        let mut rng = StdRng::seed_from_u64(seed_for(ledger, hand));
        let seat = ledger.current_player();
        let deals = match DealSampler::new(budget.samples, deadline).sample(seat, hand, belief, &mut rng) {
            Ok(deals) => deals,
            Err(err) => {
                tracing::warn!(%call, error = %err, "deal sampling failed; degraded confidence");
                return Review::trusted(call, format!("sampling failed ({err}); candidate trusted"));
            }
        };
        if deals.is_empty() {
            tracing::warn!(%call, "no consistent deals sampled; degraded confidence");
            return Review::trusted(call, "no consistent deals; candidate trusted");
        }

        let (declarer, strain) = question.play();
        let scored: Result<Vec<u8>, OracleError> = deals
            .par_iter()
            .filter(|_| Instant::now() < deadline)
            .map(|deal| oracle.tricks(deal, declarer, strain))
            .collect();
        let tricks = match scored {
            Ok(tricks) if !tricks.is_empty() => tricks,
            Ok(_) => {
                tracing::warn!(%call, "trick evaluation timed out; degraded confidence");
                return Review::trusted(call, "evaluation timed out; candidate trusted");
            }
            Err(err) => {
                tracing::warn!(%call, error = %err, "trick oracle failed; degraded confidence");
                return Review::trusted(call, format!("oracle failed ({err}); candidate trusted"));
            }
        };

        let total: u32 = tricks.iter().map(|&t| u32::from(t)).sum();
        let declarer_mean = total as f32 / tricks.len() as f32;
        let verdict = self.decide(call, question, declarer_mean, ledger);
        tracing::debug!(
            %call,
            reviewed = %verdict.call,
            samples = tricks.len(),
            mean = ?verdict.mean_tricks,
            "conflict review"
        );
        Review {
            samples: tricks.len(),
            ..verdict
        }
    }

    fn question(
        &self,
        call: Call,
        hand: &Hand,
        belief: &BeliefModel,
        ledger: &Auction,
    ) -> Option<Question> {
        if let Call::Bid { level, strain } = call {
            if level >= 6 {
                let mut after = ledger.clone();
                after.add_call(call);
                let declarer = after.current_contract()?.declarer;
                return Some(Question::Slam {
                    level,
                    strain,
                    declarer,
                });
            }
        }

        if matches!(call, Call::Double | Call::Redouble) || !ledger.is_legal_next(Call::Double) {
            return None;
        }
        let seat = ledger.current_player();
        let (bidder, _) = ledger.last_bid()?;
        if seat.relation_to(bidder) != Relation::Opponent {
            return None;
        }
        let contract = ledger.current_contract()?;
        if contract.level < 3 {
            return None;
        }
        let combined = (f32::from(hand.hcp()) + belief.estimate(seat.partner())).floor() as u8;
        if !DOUBLE_BAND.contains(&combined) {
            return None;
        }
        Some(Question::Penalty {
            level: contract.level,
            strain: contract.strain,
            declarer: contract.declarer,
        })
    }

    fn decide(&self, call: Call, question: Question, declarer_mean: f32, ledger: &Auction) -> Review {
        match question {
            Question::Slam { level, strain, .. } => {
                let needed = f32::from(6 + level);
                let shortfall = needed - declarer_mean;
                if shortfall <= self.config.slam_margin {
                    return Review {
                        mean_tricks: Some(declarer_mean),
                        ..Review::trusted(call, format!("{call} supported: {declarer_mean:.1} tricks"))
                    };
                }
                let fallback = match level {
                    7 => Call::bid(6, strain)
                        .filter(|&small| ledger.is_legal_next(small))
                        .unwrap_or(Call::Pass),
                    _ => Call::Pass,
                };
                Review {
                    call: fallback,
                    reason: format!(
                        "{call} needs {needed} tricks but samples average {declarer_mean:.1}; {fallback} instead"
                    ),
                    samples: 0,
                    mean_tricks: Some(declarer_mean),
                    changed: true,
                }
            }
            Question::Penalty { level, .. } => {
                let defense = 13.0 - declarer_mean;
                let threshold = f32::from(7 - level) + self.config.double_margin;
                if defense > threshold {
                    Review {
                        call: Call::Double,
                        reason: format!(
                            "defense averages {defense:.1} tricks against a {level}-level contract; double"
                        ),
                        samples: 0,
                        mean_tricks: Some(defense),
                        changed: call != Call::Double,
                    }
                } else {
                    Review {
                        mean_tricks: Some(defense),
                        ..Review::trusted(call, format!("defense averages {defense:.1} tricks; no double"))
                    }
                }
            }
        }
    }
}

impl Default for ConflictResolver {
    fn default() -> Self {
        Self::new(ConflictConfig::default(), Some(Arc::new(QuickTrickOracle)))
    }
}

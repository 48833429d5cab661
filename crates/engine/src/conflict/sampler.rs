//! Rejection sampling of the three unseen hands.

use super::oracle::Deal;
use crate::belief::BeliefModel;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Instant;
use thiserror::Error;
use types::{Auction, Call, Card, Hand, Position};

/// Attempts allowed per requested deal before sampling gives up.
const ATTEMPTS_PER_SAMPLE: usize = 500;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SamplingError {
    #[error("hand holds {cards} cards, expected 13")]
    InvalidHand { cards: usize },
    #[error("hand holds {card} twice")]
    DuplicateCard { card: Card },
}

/// Deals the unseen 39 cards consistently with what the auction has shown.
#[derive(Debug, Clone, Copy)]
pub struct DealSampler {
    samples: usize,
    deadline: Instant,
}

impl DealSampler {
    pub fn new(samples: usize, deadline: Instant) -> Self {
        Self { samples, deadline }
    }

    /// Up to `samples` deals in which `seat` holds `hand` and every other
    /// seat's hand fits its belief range. Returns fewer when the attempt
    /// budget or the deadline runs out first.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        seat: Position,
        hand: &Hand,
        belief: &BeliefModel,
        rng: &mut R,
    ) -> Result<Vec<Deal>, SamplingError> {
        let unseen = unseen_cards(hand)?;
        let others = [seat.next(), seat.partner(), seat.rho()];
        let max_attempts = self.samples.saturating_mul(ATTEMPTS_PER_SAMPLE);

        let mut pool = unseen;
        let mut deals = Vec::with_capacity(self.samples);
        let mut attempts = 0;
        while deals.len() < self.samples && attempts < max_attempts {
            if Instant::now() >= self.deadline {
                tracing::debug!(accepted = deals.len(), attempts, "sampling deadline reached");
                break;
            }
            attempts += 1;
            pool.shuffle(rng);

            let mut hands: [Hand; 4] = Default::default();
            hands[seat.idx()] = hand.clone();
            for (other, chunk) in others.iter().zip(pool.chunks(13)) {
                hands[other.idx()] = Hand::new(chunk.to_vec());
            }
            if others
                .iter()
                .all(|&other| belief.range(other).admits(&hands[other.idx()]))
            {
                deals.push(Deal::new(hands));
            }
        }
        tracing::trace!(accepted = deals.len(), attempts, "sampled deals");
        Ok(deals)
    }
}

fn unseen_cards(hand: &Hand) -> Result<Vec<Card>, SamplingError> {
    if hand.len() != 13 {
        return Err(SamplingError::InvalidHand { cards: hand.len() });
    }
    let mut held = [false; 52];
    for card in &hand.cards {
        let slot = &mut held[usize::from(card.id())];
        if *slot {
            return Err(SamplingError::DuplicateCard { card: *card });
        }
        *slot = true;
    }
    Ok(Card::deck()
        .into_iter()
        .filter(|card| !held[usize::from(card.id())])
        .collect())
}

/// Seed derived from the ledger and the hand, so the same turn always
/// samples the same deals.
pub fn seed_for(ledger: &Auction, hand: &Hand) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
    let fold = |hash: u64, byte: u8| (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME);

    let mut hash = fold(FNV_OFFSET, ledger.dealer.idx() as u8);
    for call in &ledger.calls {
        let code = match *call {
            Call::Pass => 0,
            Call::Double => 1,
            Call::Redouble => 2,
            Call::Bid { level, strain } => 3 + (level - 1) * 5 + strain.idx() as u8,
        };
        hash = fold(hash, code);
    }
    let mut ids: Vec<u8> = hand.cards.iter().map(|c| c.id()).collect();
    ids.sort_unstable();
    ids.into_iter().fold(hash, fold)
}

use crate::board::{Partnership, Position};
use crate::call::{Call, CallParseError};
use crate::contract::{Contract, DoubleStatus};
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The auction ledger: calls in order, with seats derived from the dealer.
///
/// The only mutation is appending a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Auction {
    pub dealer: Position,
    pub calls: Vec<Call>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    #[error("call {index}: {source}")]
    BadCall {
        index: usize,
        #[source]
        source: CallParseError,
    },
    #[error("call {index}: {call} is not legal here")]
    IllegalCall { index: usize, call: Call },
}

impl Auction {
    pub fn new(dealer: Position) -> Self {
        Self {
            dealer,
            calls: Vec::new(),
        }
    }

    /// Build a ledger from notation tokens ("1NT", "Pass", "X", ...),
    /// attributing seats by position from `dealer`. Every call is checked
    /// for legality.
    pub fn from_tokens<S: AsRef<str>>(dealer: Position, tokens: &[S]) -> Result<Self, AuctionError> {
        let mut auction = Self::new(dealer);
        for (index, token) in tokens.iter().enumerate() {
            let call: Call = token
                .as_ref()
                .parse()
                .map_err(|source| AuctionError::BadCall { index, source })?;
            if !auction.is_legal_next(call) {
                return Err(AuctionError::IllegalCall { index, call });
            }
            auction.add_call(call);
        }
        Ok(auction)
    }

    /// Build an auction from space-separated calls like "P 1C P 2C".
    /// Panics on invalid input; use for tests and known-good data only.
    pub fn bidding(dealer: Position, calls: &str) -> Self {
        let tokens: Vec<&str> = calls.split_whitespace().collect();
        Self::from_tokens(dealer, &tokens).expect("invalid auction")
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Call)> {
        let dealer = self.dealer;
        self.calls
            .iter()
            .enumerate()
            .map(move |(i, call)| (Self::seat_at(dealer, i), call))
    }

    fn seat_at(dealer: Position, index: usize) -> Position {
        Position::ALL[(dealer.idx() + index) % 4]
    }

    pub fn add_call(&mut self, call: Call) {
        self.calls.push(call);
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn current_player(&self) -> Position {
        Self::seat_at(self.dealer, self.calls.len())
    }

    pub fn current_partnership(&self) -> Partnership {
        self.current_player().partnership()
    }

    /// 1-based seat number of the player to act, counting from the dealer.
    pub fn current_seat(&self) -> u8 {
        (self.calls.len() % 4) as u8 + 1
    }

    pub fn is_open(&self) -> bool {
        self.calls.iter().any(Call::is_bid)
    }

    /// The first bid and who made it.
    pub fn opening(&self) -> Option<(Position, Call)> {
        self.iter()
            .find(|(_, call)| call.is_bid())
            .map(|(position, call)| (position, *call))
    }

    pub fn opener(&self) -> Option<Position> {
        self.opening().map(|(position, _)| position)
    }

    /// Returns the last bid (not pass/double/redouble) and who made it.
    pub fn last_bid(&self) -> Option<(Position, Call)> {
        self.iter()
            .filter(|(_, call)| call.is_bid())
            .last()
            .map(|(position, call)| (position, *call))
    }

    /// Most recent non-pass call made by `position`.
    pub fn last_action_by(&self, position: Position) -> Option<Call> {
        self.iter()
            .filter(|(pos, call)| *pos == position && !call.is_pass())
            .last()
            .map(|(_, call)| *call)
    }

    /// All calls made by `position`, in order.
    pub fn calls_by(&self, position: Position) -> Vec<Call> {
        self.iter()
            .filter(|(pos, _)| *pos == position)
            .map(|(_, call)| *call)
            .collect()
    }

    /// Returns true if a player has made any non-Pass call.
    pub fn player_has_acted(&self, player: Position) -> bool {
        self.last_action_by(player).is_some()
    }

    /// Returns true if a partnership has made at least one bid.
    pub fn partnership_has_bid(&self, partnership: Partnership) -> bool {
        self.iter()
            .any(|(pos, call)| pos.partnership() == partnership && call.is_bid())
    }

    /// Lowest bid that may legally follow, or `None` once 7NT has been bid
    /// or the auction is over.
    pub fn minimum_bid(&self) -> Option<Call> {
        if self.is_finished() {
            return None;
        }
        match self.last_bid().and_then(|(_, call)| call.bid_rank()) {
            None => Some(Call::Bid {
                level: 1,
                strain: Strain::Clubs,
            }),
            Some(34) => None,
            Some(rank) => {
                let next = rank + 1;
                Some(Call::Bid {
                    level: next / 5 + 1,
                    strain: Strain::ALL[(next % 5) as usize],
                })
            }
        }
    }

    /// Returns the minimum legal bid for the given strain.
    pub fn minimum_bid_in(&self, strain: Strain) -> Option<Call> {
        let floor = self.minimum_bid()?;
        let (floor_level, floor_strain) = (floor.level()?, floor.strain()?);
        let level = if strain >= floor_strain {
            floor_level
        } else {
            floor_level + 1
        };
        Call::bid(level, strain)
    }

    pub fn is_legal_next(&self, call: Call) -> bool {
        let mut extended = self.calls.clone();
        extended.push(call);
        Self::validate_calls(&extended)
    }

    pub fn is_finished(&self) -> bool {
        Self::is_finished_at(&self.calls, self.calls.len())
    }

    /// The contract as it stands after the calls so far.
    pub fn current_contract(&self) -> Option<Contract> {
        let mut last_bid = None;
        let mut double_status = DoubleStatus::Undoubled;
        // First seat of each side to name each strain: [side][strain].
        let mut first_namer: [[Option<Position>; 5]; 2] = [[None; 5]; 2];

        for (position, call) in self.iter() {
            match call {
                Call::Bid { level, strain } => {
                    let namer = first_namer[position.partnership().idx()][strain.idx()]
                        .get_or_insert(position);
                    last_bid = Some((*level, *strain, *namer));
                    double_status = DoubleStatus::Undoubled;
                }
                Call::Double => double_status = DoubleStatus::Doubled,
                Call::Redouble => double_status = DoubleStatus::Redoubled,
                Call::Pass => {}
            }
        }

        last_bid.map(|(level, strain, declarer)| Contract {
            level,
            strain,
            double_status,
            declarer,
        })
    }

    /// The finished contract handed to the card-play engine.
    pub fn final_contract(&self) -> Option<Contract> {
        if self.is_finished() {
            self.current_contract()
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        Self::validate_calls(&self.calls)
    }

    /// Check bid ordering and double/redouble rules over a call sequence.
    pub fn validate_calls(calls: &[Call]) -> bool {
        let mut last_bid: Option<(usize, Call)> = None;
        let mut doubled_at: Option<usize> = None;
        let mut redoubled = false;

        for (i, call) in calls.iter().enumerate() {
            if i > 0 && Self::is_finished_at(calls, i) {
                return false;
            }
            match call {
                Call::Pass => {}
                Call::Bid { level, .. } => {
                    if !(1..=7).contains(level) {
                        return false;
                    }
                    if let Some((_, previous)) = last_bid {
                        if !call.outranks(&previous) {
                            return false;
                        }
                    }
                    last_bid = Some((i, *call));
                    doubled_at = None;
                    redoubled = false;
                }
                Call::Double => {
                    let Some((bid_index, _)) = last_bid else {
                        return false;
                    };
                    // Only the opponents of the bidder may double, once.
                    if doubled_at.is_some() || redoubled || (i - bid_index) % 2 == 0 {
                        return false;
                    }
                    doubled_at = Some(i);
                }
                Call::Redouble => {
                    let Some(double_index) = doubled_at else {
                        return false;
                    };
                    if redoubled || (i - double_index) % 2 == 0 {
                        return false;
                    }
                    redoubled = true;
                    doubled_at = None;
                }
            }
        }
        true
    }

    /// Return all calls that would be legal as the next call in this auction.
    pub fn legal_calls(&self) -> Vec<Call> {
        if self.is_finished() {
            return Vec::new();
        }
        let bids = (1..=7u8).flat_map(|level| {
            Strain::ALL
                .iter()
                .map(move |&strain| Call::Bid { level, strain })
        });
        std::iter::once(Call::Pass)
            .chain(bids)
            .chain([Call::Double, Call::Redouble])
            .filter(|&call| self.is_legal_next(call))
            .collect()
    }

    fn is_finished_at(calls: &[Call], len: usize) -> bool {
        if len < 4 {
            return false;
        }
        let prefix = &calls[..len];
        if prefix.iter().all(Call::is_pass) {
            return true;
        }
        prefix[len - 3..].iter().all(Call::is_pass)
    }
}

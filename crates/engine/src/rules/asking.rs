use serde::Serialize;
use types::{Auction, Call, Position, Strain, Suit};

/// Turns inside an ace-asking exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AskingSlot {
    /// Partner of the asker answers with an ace count.
    Response,
    /// The asker places the contract right after the answer.
    SignOff,
}

/// A 4NT ace ask whose exchange is still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AskingSequence {
    pub asker: Position,
    pub ask_index: usize,
    pub trump: Option<Suit>,
}

const ASK: Call = Call::Bid {
    level: 4,
    strain: Strain::Notrump,
};

impl AskingSequence {
    /// The exchange whose next slot is the ledger's next call, if any.
    pub fn detect(auction: &Auction) -> Option<Self> {
        let (ask_index, asker) = auction
            .iter()
            .enumerate()
            .filter(|(_, (_, call))| **call == ASK)
            .map(|(i, (pos, _))| (i, pos))
            .last()?;

        let before = &auction.calls[..ask_index];
        let responder = asker.partner();
        let seat_of = |i: usize| Position::ALL[(auction.dealer.idx() + i) % 4];
        let responder_last = before
            .iter()
            .enumerate()
            .filter(|(i, call)| seat_of(*i) == responder && !call.is_pass())
            .map(|(_, call)| *call)
            .last();
        // 4NT over partner's notrump is quantitative, not an ask.
        if responder_last.and_then(|c| c.strain()) == Some(Strain::Notrump) {
            return None;
        }

        let ours: Vec<(Position, Suit)> = before
            .iter()
            .enumerate()
            .filter(|(i, _)| seat_of(*i).partnership() == asker.partnership())
            .filter_map(|(i, call)| call.suit().map(|s| (seat_of(i), s)))
            .collect();
        if ours.is_empty() {
            return None;
        }
        let agreed = ours
            .iter()
            .rev()
            .find(|(pos, suit)| ours.iter().any(|(p, s)| s == suit && p != pos))
            .or_else(|| ours.iter().rev().find(|(pos, _)| *pos == responder))
            .map(|(_, suit)| *suit);

        let sequence = AskingSequence {
            asker,
            ask_index,
            trump: agreed,
        };
        let slot = sequence.slot_for(auction.len())?;
        if slot == AskingSlot::SignOff && sequence.response(auction).is_none() {
            return None;
        }
        Some(sequence)
    }

    pub fn responder(&self) -> Position {
        self.asker.partner()
    }

    /// Which slot, if any, the call at `index` fills.
    pub fn slot_for(&self, index: usize) -> Option<AskingSlot> {
        match index.checked_sub(self.ask_index)? {
            2 => Some(AskingSlot::Response),
            4 => Some(AskingSlot::SignOff),
            _ => None,
        }
    }

    /// The responder's ace-showing answer, once made.
    pub fn response(&self, auction: &Auction) -> Option<Call> {
        auction
            .calls
            .get(self.ask_index + 2)
            .copied()
            .filter(|call| Self::aces_shown(*call).is_some())
    }

    /// Aces shown by a step response: 5♣ = 0 (or 4), 5♦ = 1, 5♥ = 2, 5♠ = 3.
    pub fn aces_shown(call: Call) -> Option<u8> {
        match call {
            Call::Bid { level: 5, strain } => strain.to_suit().map(|s| s.idx() as u8),
            _ => None,
        }
    }

    /// The response that shows `aces` (counted mod 4).
    pub fn response_for(aces: u8) -> Call {
        Call::Bid {
            level: 5,
            strain: Strain::ALL[(aces % 4) as usize],
        }
    }
}

use super::asking::{AskingSequence, AskingSlot};
use crate::belief::BeliefModel;
use crate::dsl::annotations::Annotation;
use types::{Auction, Call, Hand, Position, Relation, Suit};

/// Read-only view of the auction from the seat about to call.
#[derive(Debug, Clone)]
pub struct AuctionContext<'a> {
    auction: &'a Auction,
    seat: Position,
    belief: &'a BeliefModel,
    asking: Option<AskingSequence>,
}

impl<'a> AuctionContext<'a> {
    pub fn new(auction: &'a Auction, belief: &'a BeliefModel) -> Self {
        Self {
            auction,
            seat: auction.current_player(),
            belief,
            asking: AskingSequence::detect(auction),
        }
    }

    pub fn auction(&self) -> &'a Auction {
        self.auction
    }

    pub fn calls(&self) -> &'a [Call] {
        &self.auction.calls
    }

    pub fn seat(&self) -> Position {
        self.seat
    }

    pub fn partner(&self) -> Position {
        self.seat.partner()
    }

    pub fn belief(&self) -> &'a BeliefModel {
        self.belief
    }

    pub fn relation(&self, position: Position) -> Relation {
        self.seat.relation_to(position)
    }

    /// The active asking sequence, if any.
    pub fn asking(&self) -> Option<&AskingSequence> {
        self.asking.as_ref()
    }

    /// Which slot of the active asking sequence this turn fills.
    pub fn asking_slot(&self) -> Option<AskingSlot> {
        self.asking
            .as_ref()
            .and_then(|seq| seq.slot_for(self.auction.len()))
    }

    /// The opening bid and how its bidder relates to us.
    pub fn opening(&self) -> Option<(Relation, Call)> {
        self.auction
            .opening()
            .map(|(pos, call)| (self.relation(pos), call))
    }

    pub fn opened_by(&self, relation: Relation) -> bool {
        self.opening().is_some_and(|(rel, _)| rel == relation)
    }

    pub fn last_bid(&self) -> Option<(Relation, Call)> {
        self.auction
            .last_bid()
            .map(|(pos, call)| (self.relation(pos), call))
    }

    /// Partner's most recent non-pass call.
    pub fn partner_last_call(&self) -> Option<Call> {
        self.auction.last_action_by(self.partner())
    }

    /// The call just made by right-hand opponent.
    pub fn rho_call(&self) -> Option<Call> {
        self.auction.calls.last().copied()
    }

    pub fn my_calls(&self) -> Vec<Call> {
        self.auction.calls_by(self.seat)
    }

    /// True once we have made any call other than pass.
    pub fn has_acted(&self) -> bool {
        self.auction.player_has_acted(self.seat)
    }

    pub fn is_legal(&self, call: Call) -> bool {
        self.auction.is_legal_next(call)
    }

    pub fn partner_estimate(&self) -> f32 {
        self.belief.estimate(self.partner())
    }

    /// Our exact HCP plus partner's estimate, rounded down.
    pub fn combined_estimate(&self, hand: &Hand) -> u8 {
        (f32::from(hand.hcp()) + self.partner_estimate()).floor() as u8
    }

    /// Suits bid naturally by seats standing in `relation` to us.
    pub fn suits_bid_by(&self, relation: Relation) -> Vec<Suit> {
        let mut suits = Vec::new();
        for (pos, call) in self.auction.iter() {
            if self.relation(pos) != relation {
                continue;
            }
            if let Some(suit) = call.suit() {
                if !suits.contains(&suit) {
                    suits.push(suit);
                }
            }
        }
        suits
    }

    /// The suit our partnership has agreed on: one both of us have bid, or
    /// the opener's major after a Jacoby 2NT response.
    pub fn agreed_suit(&self) -> Option<Suit> {
        let mine = self.suits_bid_by(Relation::Me);
        let partners = self.suits_bid_by(Relation::Partner);

        let mut agreed = None;
        for (pos, call) in self.auction.iter() {
            let Some(suit) = call.suit() else { continue };
            let relation = self.relation(pos);
            let other = match relation {
                Relation::Me => &partners,
                Relation::Partner => &mine,
                Relation::Opponent => continue,
            };
            if other.contains(&suit) {
                agreed = Some(suit);
            }
        }
        if agreed.is_some() {
            return agreed;
        }

        if self
            .belief
            .has_annotation(self.partner(), Annotation::Jacoby2NT)
        {
            return mine.first().copied();
        }
        if self.belief.has_annotation(self.seat, Annotation::Jacoby2NT) {
            return partners.first().copied();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Strain;

    fn call(s: &str) -> Call {
        s.parse().unwrap()
    }

    #[test]
    fn opening_relation() {
        let belief = BeliefModel::default();
        let auction = Auction::bidding(Position::North, "1N P");
        let ctx = AuctionContext::new(&auction, &belief);
        assert_eq!(ctx.seat(), Position::South);
        assert_eq!(ctx.opening(), Some((Relation::Partner, call("1NT"))));
        assert!(ctx.opened_by(Relation::Partner));
        assert_eq!(ctx.partner_last_call(), Some(call("1NT")));
        assert_eq!(ctx.rho_call(), Some(Call::Pass));
    }

    #[test]
    fn agreed_suit_from_raise() {
        let belief = BeliefModel::default();
        let auction = Auction::bidding(Position::North, "1H P 2H P");
        let ctx = AuctionContext::new(&auction, &belief);
        assert_eq!(ctx.seat(), Position::North);
        assert_eq!(ctx.agreed_suit(), Some(Suit::Hearts));

        let auction = Auction::bidding(Position::North, "1H 1S 2C P");
        let ctx = AuctionContext::new(&auction, &belief);
        assert_eq!(ctx.agreed_suit(), None);
        assert_eq!(ctx.suits_bid_by(Relation::Opponent), vec![Suit::Spades]);
    }

    #[test]
    fn combined_estimate_uses_actual_points() {
        let belief = BeliefModel::default();
        let auction = Auction::new(Position::North);
        let ctx = AuctionContext::new(&auction, &belief);
        let hand = Hand::parse("AK32.K32.Q32.J32");
        // 13 + 0.25 * 37
        assert_eq!(ctx.combined_estimate(&hand), 22);
        assert!(ctx.is_legal(Call::Bid {
            level: 1,
            strain: Strain::Clubs
        }));
    }
}

//! Blackwood: the 4NT ask, the step answer, and the asker's placement.

use crate::convention;
use crate::dsl::auction_predicates::{FitAgreed, InAskingSlot, LastBidMaxLevel};
use crate::dsl::bid;
use crate::dsl::call_predicates::{IsAgreedSuit, IsCall, IsLegal};
use crate::dsl::shows::{ShowAceCount, ShowSignOffAces, ShowSlamValues};
use crate::rules::{AskingSlot, ForcingLevel, RuleMetadata};
use types::Strain;

convention! {
    struct BlackwoodAsk;
    tier: Artificial,
    rationale: "Blackwood: asking for aces",
    auction: [FitAgreed, LastBidMaxLevel(4)],
    call: [IsCall(4, Strain::Notrump), IsLegal],
    shows: [ShowSlamValues],
    annotations: [AceAsk],
    metadata: RuleMetadata::artificial(ForcingLevel::OneRound),
}

convention! {
    struct BlackwoodResponse;
    tier: Artificial,
    rationale: "Blackwood response: {call} shows the ace count",
    auction: [InAskingSlot(AskingSlot::Response)],
    call: [IsLegal],
    shows: [ShowAceCount],
    metadata: RuleMetadata::asking_slot(),
    candidates: [
        bid(5, Strain::Clubs),
        bid(5, Strain::Diamonds),
        bid(5, Strain::Hearts),
        bid(5, Strain::Spades),
    ],
    prefer: FirstListed,
}

convention! {
    struct BlackwoodSignOff;
    tier: Artificial,
    rationale: "Place the contract in {call} after the ace answer",
    auction: [InAskingSlot(AskingSlot::SignOff)],
    call: [IsAgreedSuit, IsLegal],
    shows: [ShowSignOffAces],
    metadata: RuleMetadata::asking_slot(),
    candidates: [
        bid(7, Strain::Clubs),
        bid(7, Strain::Diamonds),
        bid(7, Strain::Hearts),
        bid(7, Strain::Spades),
        bid(6, Strain::Clubs),
        bid(6, Strain::Diamonds),
        bid(6, Strain::Hearts),
        bid(6, Strain::Spades),
        bid(5, Strain::Clubs),
        bid(5, Strain::Diamonds),
        bid(5, Strain::Hearts),
        bid(5, Strain::Spades),
    ],
    prefer: FirstListed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::BeliefModel;
    use crate::config::{BeliefConfig, PriorityTable};
    use crate::dsl::Convention;
    use crate::rules::{catalog, AuctionContext, RuleModule};
    use types::{Auction, Call, Hand, Position};

    fn evaluate(rule: &dyn RuleModule, calls: &str, hand: &str) -> Option<Call> {
        let auction = Auction::bidding(Position::North, calls);
        let registry = catalog::standard().build(&PriorityTable::default()).unwrap();
        let belief = BeliefModel::update(&auction, &registry, BeliefConfig::default());
        let ctx = AuctionContext::new(&auction, &belief);
        rule.evaluate(&Hand::parse(hand), &ctx).map(|p| p.call)
    }

    fn call(s: &str) -> Option<Call> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn ask_needs_fit_and_values() {
        // 1S P 3S P: South limit-raised, North holds 22.
        let strong = "A2.KQ2.AK2.AQ432";
        assert_eq!(evaluate(&BlackwoodAsk, "1S P 3S P", strong), call("4N"));
        let minimum = "32.K32.A32.AQ432";
        assert_eq!(evaluate(&BlackwoodAsk, "1S P 3S P", minimum), None);
        // No fit yet
        assert_eq!(evaluate(&BlackwoodAsk, "1S P 2H P", strong), None);
    }

    #[test]
    fn response_counts_aces() {
        let calls = "1S P 3S P 4N P";
        assert_eq!(evaluate(&BlackwoodResponse, calls, "K2.A32.KQ32.Q432"), call("5D"));
        assert_eq!(evaluate(&BlackwoodResponse, calls, "K2.A32.AQ32.A432"), call("5S"));
        assert_eq!(evaluate(&BlackwoodResponse, calls, "K2.Q32.KQ32.Q432"), call("5C"));
        assert_eq!(evaluate(&BlackwoodResponse, "1S P 3S P", "K2.A32.KQ32.Q432"), None);
    }

    #[test]
    fn sign_off_by_aces() {
        // North holds three aces.
        let asker = "A2.AQ2.K2.AKQ432";
        assert_eq!(evaluate(&BlackwoodSignOff, "1S P 3S P 4N P 5D P", asker), call("6S"));
        assert_eq!(evaluate(&BlackwoodSignOff, "1S P 3S P 4N P 5C P", asker), call("6S"));
        // Two aces between us: stop at five.
        let asker = "K2.AQ2.KQ2.AKQ32";
        assert_eq!(evaluate(&BlackwoodSignOff, "1S P 3S P 4N P 5C P", asker), call("5S"));
        // No aces here, so 5♣ showed all four.
        let aceless = "K2.KQ2.KQ2.KQJ32";
        assert_eq!(evaluate(&BlackwoodSignOff, "1S P 3S P 4N P 5C P", aceless), call("6S"));
        assert!(BlackwoodSignOff.metadata().is_asking_sequence_slot);
    }
}

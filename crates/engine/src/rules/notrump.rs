//! Responding to partner's 1NT opening, and opener's replies to the
//! artificial responses.

use crate::convention;
use crate::dsl::auction_predicates::{
    ActionCount, FirstAction, OpeningWas, PartnerLastCallIn, RhoPassed,
};
use crate::dsl::bid;
use crate::dsl::call_predicates::{CompletesTransfer, IsCall};
use crate::dsl::shows::{
    ShowFourCardMajor, ShowHcpRange, ShowMinHcp, ShowNoFourCardMajor, ShowStaymanAnswer,
    ShowTransferSuit,
};
use crate::rules::{ForcingLevel, RuleMetadata};
use types::{Relation, Strain};

const ONE_NOTRUMP: types::Call = bid(1, Strain::Notrump);

convention! {
    struct JacobyTransfer;
    tier: Artificial,
    rationale: "Jacoby transfer: {call} shows five of the next suit",
    auction: [OpeningWas(Relation::Partner, ONE_NOTRUMP), FirstAction, RhoPassed],
    call: [],
    shows: [ShowTransferSuit],
    annotations: [Transfer],
    metadata: RuleMetadata::artificial(ForcingLevel::OneRound),
    candidates: [bid(2, Strain::Hearts), bid(2, Strain::Diamonds)],
    prefer: FirstListed,
}

convention! {
    struct Stayman;
    tier: Artificial,
    rationale: "Stayman: asking for a four-card major",
    auction: [OpeningWas(Relation::Partner, ONE_NOTRUMP), FirstAction, RhoPassed],
    call: [IsCall(2, Strain::Clubs)],
    shows: [ShowMinHcp(8), ShowFourCardMajor],
    annotations: [Stayman],
    metadata: RuleMetadata::artificial(ForcingLevel::OneRound),
}

convention! {
    struct ThreeNotrumpRaise;
    tier: Constructive,
    rationale: "Raise to game in notrump",
    auction: [OpeningWas(Relation::Partner, ONE_NOTRUMP), FirstAction, RhoPassed],
    call: [IsCall(3, Strain::Notrump)],
    shows: [ShowHcpRange(10, 15), ShowNoFourCardMajor],
}

convention! {
    struct TwoNotrumpInvite;
    tier: Invitational,
    rationale: "Invite game in notrump",
    auction: [OpeningWas(Relation::Partner, ONE_NOTRUMP), FirstAction, RhoPassed],
    call: [IsCall(2, Strain::Notrump)],
    shows: [ShowHcpRange(8, 9)],
}

convention! {
    struct TransferCompletion;
    tier: Artificial,
    rationale: "Complete the transfer to {call}",
    auction: [
        OpeningWas(Relation::Me, ONE_NOTRUMP),
        PartnerLastCallIn(vec![bid(2, Strain::Diamonds), bid(2, Strain::Hearts)]),
        RhoPassed,
        ActionCount(1),
    ],
    call: [CompletesTransfer],
    shows: [],
    metadata: RuleMetadata::artificial(ForcingLevel::None),
}

convention! {
    struct StaymanResponse;
    tier: Artificial,
    rationale: "Answer Stayman with {call}",
    auction: [
        OpeningWas(Relation::Me, ONE_NOTRUMP),
        PartnerLastCallIn(vec![bid(2, Strain::Clubs)]),
        RhoPassed,
        ActionCount(1),
    ],
    call: [],
    shows: [ShowStaymanAnswer],
    metadata: RuleMetadata::artificial(ForcingLevel::None),
    candidates: [bid(2, Strain::Hearts), bid(2, Strain::Spades), bid(2, Strain::Diamonds)],
    prefer: FirstListed,
}

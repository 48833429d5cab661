use crate::convention;
use crate::dsl::auction_predicates::IsNotOpen;
use crate::dsl::call_predicates::{IsCall, IsLevel, IsPass, IsStrain, IsSuit, NotCall};
use crate::dsl::shows::{
    ShowBalanced, ShowHcpRange, ShowMaxHcp, ShowMinHcp, ShowMinSuitLength, ShowOpeningSuitLength,
    ShowPreemptLength,
};
use crate::rules::{ForcingLevel, RuleMetadata};
use types::Strain;

convention! {
    struct Strong2COpening;
    tier: Artificial,
    rationale: "Strong 2♣ opening",
    auction: [IsNotOpen],
    call: [IsCall(2, Strain::Clubs)],
    shows: [ShowMinHcp(22)],
    metadata: RuleMetadata::artificial(ForcingLevel::OneRound),
}

convention! {
    struct OneNotrumpOpening;
    tier: Constructive,
    rationale: "1NT opening",
    auction: [IsNotOpen],
    call: [IsCall(1, Strain::Notrump)],
    shows: [ShowHcpRange(15, 17), ShowBalanced],
    annotations: [NotrumpSystemsOn],
}

convention! {
    struct TwoNotrumpOpening;
    tier: Constructive,
    rationale: "2NT opening",
    auction: [IsNotOpen],
    call: [IsCall(2, Strain::Notrump)],
    shows: [ShowHcpRange(20, 21), ShowBalanced],
}

convention! {
    struct OneSuitOpening;
    tier: Constructive,
    rationale: "{call} opening",
    auction: [IsNotOpen],
    call: [IsLevel(1), IsSuit],
    shows: [ShowOpeningSuitLength, ShowHcpRange(12, 21)],
}

convention! {
    struct WeakTwoOpening;
    tier: Competitive,
    rationale: "Weak {call}",
    auction: [IsNotOpen],
    call: [IsLevel(2), IsSuit, NotCall(Box::new(IsStrain(Strain::Clubs)))],
    shows: [ShowMinSuitLength(6), ShowHcpRange(5, 10)],
}

convention! {
    struct PreemptOpening;
    tier: Competitive,
    rationale: "Preemptive {call} opening",
    auction: [IsNotOpen],
    call: [IsLevel(3), IsSuit],
    shows: [ShowPreemptLength, ShowMaxHcp(10)],
    metadata: RuleMetadata {
        bypass_strength_check: true,
        ..RuleMetadata::NATURAL
    },
}

convention! {
    struct OpeningPass;
    tier: Competitive,
    rationale: "Not enough to open",
    auction: [IsNotOpen],
    call: [IsPass],
    shows: [ShowMaxHcp(11)],
}

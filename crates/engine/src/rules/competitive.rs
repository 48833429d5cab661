use crate::convention;
use crate::dsl::auction_predicates::{
    LastBidBy, LastBidMaxLevel, LastBidMinLevel, OpenedBy, RhoMadeLastBid, WeHaveOnlyPassed,
};
use crate::dsl::call_predicates::{
    IsCall, IsCheapest, IsDouble, IsLegal, IsNewSuit, IsPass, IsSuit, MaxLevel,
};
use crate::dsl::shows::{
    ShowBalanced, ShowGoodSuit, ShowHcpRange, ShowMinHcp, ShowMinSuitLength, ShowOvercallValues,
    ShowStopperInOpponentSuit, ShowSupportForUnbidSuits, ShowTrumpStack,
};
use crate::rules::{ForcingLevel, RuleMetadata};
use types::{Relation, Strain};

convention! {
    struct OneNotrumpOvercall;
    tier: Competitive,
    rationale: "Notrump overcall",
    auction: [
        OpenedBy(Relation::Opponent),
        RhoMadeLastBid,
        WeHaveOnlyPassed,
        LastBidMaxLevel(1),
    ],
    call: [IsCall(1, Strain::Notrump), IsLegal],
    shows: [ShowHcpRange(15, 18), ShowBalanced, ShowStopperInOpponentSuit],
    annotations: [NotrumpSystemsOn],
}

convention! {
    struct SimpleOvercall;
    tier: Competitive,
    rationale: "Suited overcall of {call}",
    auction: [OpenedBy(Relation::Opponent), RhoMadeLastBid, WeHaveOnlyPassed],
    call: [IsSuit, MaxLevel(2), IsCheapest, IsNewSuit, IsLegal],
    shows: [ShowOvercallValues, ShowMinSuitLength(5), ShowGoodSuit],
    annotations: [Overcall],
}

convention! {
    struct TakeoutDouble;
    tier: Competitive,
    rationale: "Takeout double",
    auction: [
        OpenedBy(Relation::Opponent),
        RhoMadeLastBid,
        WeHaveOnlyPassed,
        LastBidMaxLevel(2),
    ],
    call: [IsDouble, IsLegal],
    shows: [ShowMinHcp(12), ShowSupportForUnbidSuits],
    metadata: RuleMetadata::artificial(ForcingLevel::None),
}

convention! {
    struct PenaltyDouble;
    tier: Competitive,
    rationale: "Penalty double",
    auction: [LastBidMinLevel(3), LastBidBy(Relation::Opponent)],
    call: [IsDouble, IsLegal],
    shows: [ShowTrumpStack],
}

convention! {
    struct CompetitivePass;
    tier: Competitive,
    rationale: "Pass over the opponents' opening",
    auction: [OpenedBy(Relation::Opponent), WeHaveOnlyPassed],
    call: [IsPass],
    shows: [],
}

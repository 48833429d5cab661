use crate::convention;
use crate::dsl::auction_predicates::{
    ActionCount, FirstAction, OpenedBy, OpenedOneMajor, PartnerAnnotated, RhoPassed,
};
use crate::dsl::annotations::Annotation;
use crate::dsl::call_predicates::{IsCall, IsLevel, IsOpenedSuit, IsPartnerSuit};
use crate::dsl::shows::{
    ShowHcpRange, ShowMaxSuitLength, ShowMinHcp, ShowMinSuitLength, ShowSupportForPartnerSuit,
};
use crate::rules::{ForcingLevel, RuleMetadata};
use types::{Relation, Strain};

convention! {
    struct LimitRaise;
    tier: Invitational,
    rationale: "Limit raise to {call}",
    auction: [OpenedOneMajor(Relation::Partner), FirstAction, RhoPassed],
    call: [IsLevel(3), IsPartnerSuit],
    shows: [ShowHcpRange(10, 12), ShowMinSuitLength(4)],
}

convention! {
    struct SingleRaise;
    tier: Invitational,
    rationale: "Single raise to {call}",
    auction: [OpenedOneMajor(Relation::Partner), FirstAction, RhoPassed],
    call: [IsLevel(2), IsPartnerSuit],
    shows: [ShowHcpRange(6, 10), ShowMinSuitLength(3)],
}

convention! {
    struct Jacoby2NT;
    tier: Artificial,
    rationale: "Jacoby 2NT: game-forcing raise",
    auction: [OpenedOneMajor(Relation::Partner), FirstAction, RhoPassed],
    call: [IsCall(2, Strain::Notrump)],
    shows: [ShowMinHcp(13), ShowSupportForPartnerSuit(4)],
    annotations: [Jacoby2NT],
    metadata: RuleMetadata::artificial(ForcingLevel::Game),
}

convention! {
    struct GameRaise;
    tier: Constructive,
    rationale: "Raise to game in {call}",
    auction: [OpenedOneMajor(Relation::Partner), FirstAction, RhoPassed],
    call: [IsLevel(4), IsPartnerSuit],
    shows: [ShowMinHcp(13), ShowMinSuitLength(3), ShowMaxSuitLength(3)],
}

convention! {
    struct Jacoby2NTRebid;
    tier: Artificial,
    rationale: "Sign off in {call} after Jacoby 2NT",
    auction: [
        OpenedBy(Relation::Me),
        PartnerAnnotated(Annotation::Jacoby2NT),
        ActionCount(1),
        RhoPassed,
    ],
    call: [IsLevel(4), IsOpenedSuit],
    shows: [],
}

use crate::convention;
use crate::dsl::auction_predicates::{FirstAction, OpenedOneOfASuit, RhoPassed};
use crate::dsl::call_predicates::{IsCall, IsLegal, IsLevel, IsNewSuit};
use crate::dsl::shows::{ShowHcpRange, ShowMinHcp, ShowMinSuitLength};
use types::{Relation, Strain};

convention! {
    struct NewSuitOneLevel;
    tier: Invitational,
    rationale: "New suit: {call}",
    auction: [OpenedOneOfASuit(Relation::Partner), FirstAction, RhoPassed],
    call: [IsLevel(1), IsNewSuit, IsLegal],
    shows: [ShowMinHcp(6), ShowMinSuitLength(4)],
}

convention! {
    struct OneNotrumpResponse;
    tier: Invitational,
    rationale: "1NT response",
    auction: [OpenedOneOfASuit(Relation::Partner), FirstAction, RhoPassed],
    call: [IsCall(1, Strain::Notrump), IsLegal],
    shows: [ShowHcpRange(6, 10)],
}

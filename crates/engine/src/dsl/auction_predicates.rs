use crate::dsl::annotations::Annotation;
use crate::rules::{AskingSlot, AuctionContext};
use std::fmt::Debug;
use types::{Call, Relation};

pub trait AuctionPredicate: Send + Sync + Debug {
    fn check(&self, ctx: &AuctionContext) -> bool;
}

pub fn not_auction(predicate: impl AuctionPredicate + 'static) -> NotAuction {
    NotAuction(Box::new(predicate))
}

#[derive(Debug)]
pub struct NotAuction(pub Box<dyn AuctionPredicate>);
impl AuctionPredicate for NotAuction {
    fn check(&self, ctx: &AuctionContext) -> bool {
        !self.0.check(ctx)
    }
}

#[derive(Debug)]
pub struct IsOpen;
impl AuctionPredicate for IsOpen {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.auction().is_open()
    }
}

#[derive(Debug)]
pub struct IsNotOpen;
impl AuctionPredicate for IsNotOpen {
    fn check(&self, ctx: &AuctionContext) -> bool {
        !ctx.auction().is_open()
    }
}

/// The opening bid was made by a seat standing in this relation to us.
#[derive(Debug)]
pub struct OpenedBy(pub Relation);
impl AuctionPredicate for OpenedBy {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.opened_by(self.0)
    }
}

/// The opening bid was exactly this call, made by this relation.
#[derive(Debug)]
pub struct OpeningWas(pub Relation, pub Call);
impl AuctionPredicate for OpeningWas {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.opening() == Some((self.0, self.1))
    }
}

/// The opening bid was one of a suit by this relation.
#[derive(Debug)]
pub struct OpenedOneOfASuit(pub Relation);
impl AuctionPredicate for OpenedOneOfASuit {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.opening()
            .is_some_and(|(rel, call)| rel == self.0 && call.level() == Some(1) && call.suit().is_some())
    }
}

/// The opening bid was one of a major by this relation.
#[derive(Debug)]
pub struct OpenedOneMajor(pub Relation);
impl AuctionPredicate for OpenedOneMajor {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.opening().is_some_and(|(rel, call)| {
            rel == self.0 && call.level() == Some(1) && call.strain().is_some_and(|s| s.is_major())
        })
    }
}

#[derive(Debug)]
pub struct PartnerLastCallIn(pub Vec<Call>);
impl AuctionPredicate for PartnerLastCallIn {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.partner_last_call()
            .is_some_and(|call| self.0.contains(&call))
    }
}

#[derive(Debug)]
pub struct PartnerAnnotated(pub Annotation);
impl AuctionPredicate for PartnerAnnotated {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.belief().has_annotation(ctx.partner(), self.0)
    }
}

/// We have made no call other than pass.
#[derive(Debug)]
pub struct FirstAction;
impl AuctionPredicate for FirstAction {
    fn check(&self, ctx: &AuctionContext) -> bool {
        !ctx.has_acted()
    }
}

/// We have made exactly this many non-pass calls.
#[derive(Debug)]
pub struct ActionCount(pub usize);
impl AuctionPredicate for ActionCount {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.my_calls().iter().filter(|c| !c.is_pass()).count() == self.0
    }
}

#[derive(Debug)]
pub struct RhoPassed;
impl AuctionPredicate for RhoPassed {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.rho_call() == Some(Call::Pass)
    }
}

/// Checks that RHO's call (the last call in the auction) was not a pass.
/// This identifies "direct seat": we are acting immediately after an opponent's action.
#[derive(Debug)]
pub struct RhoMadeLastBid;
impl AuctionPredicate for RhoMadeLastBid {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.rho_call().is_some_and(|call| call.is_bid())
    }
}

/// Checks that our partnership has only passed (no bids, doubles, or redoubles).
#[derive(Debug)]
pub struct WeHaveOnlyPassed;
impl AuctionPredicate for WeHaveOnlyPassed {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.auction()
            .iter()
            .filter(|(pos, _)| ctx.relation(*pos) != Relation::Opponent)
            .all(|(_, call)| call.is_pass())
    }
}

/// Checks that the last bid in the auction is at most the given level.
#[derive(Debug)]
pub struct LastBidMaxLevel(pub u8);
impl AuctionPredicate for LastBidMaxLevel {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.last_bid()
            .and_then(|(_, call)| call.level())
            .is_some_and(|l| l <= self.0)
    }
}

#[derive(Debug)]
pub struct LastBidMinLevel(pub u8);
impl AuctionPredicate for LastBidMinLevel {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.last_bid()
            .and_then(|(_, call)| call.level())
            .is_some_and(|l| l >= self.0)
    }
}

#[derive(Debug)]
pub struct LastBidBy(pub Relation);
impl AuctionPredicate for LastBidBy {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.last_bid().is_some_and(|(rel, _)| rel == self.0)
    }
}

#[derive(Debug)]
pub struct FitAgreed;
impl AuctionPredicate for FitAgreed {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.agreed_suit().is_some()
    }
}

/// This turn fills the given slot of an active asking sequence.
#[derive(Debug)]
pub struct InAskingSlot(pub AskingSlot);
impl AuctionPredicate for InAskingSlot {
    fn check(&self, ctx: &AuctionContext) -> bool {
        ctx.asking_slot() == Some(self.0)
    }
}

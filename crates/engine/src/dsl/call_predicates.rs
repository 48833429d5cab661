use crate::rules::AuctionContext;
use std::fmt::Debug;
use types::{Call, Relation, Strain};

pub trait CallPredicate: Send + Sync + Debug {
    fn check(&self, ctx: &AuctionContext, call: &Call) -> bool;
}

#[derive(Debug)]
pub struct NotCall(pub Box<dyn CallPredicate>);
impl CallPredicate for NotCall {
    fn check(&self, ctx: &AuctionContext, call: &Call) -> bool {
        !self.0.check(ctx, call)
    }
}

pub fn not_call(predicate: impl CallPredicate + 'static) -> NotCall {
    NotCall(Box::new(predicate))
}

#[derive(Debug)]
pub struct IsPass;
impl CallPredicate for IsPass {
    fn check(&self, _ctx: &AuctionContext, call: &Call) -> bool {
        call.is_pass()
    }
}

#[derive(Debug)]
pub struct IsDouble;
impl CallPredicate for IsDouble {
    fn check(&self, _ctx: &AuctionContext, call: &Call) -> bool {
        *call == Call::Double
    }
}

#[derive(Debug)]
pub struct IsLevel(pub u8);
impl CallPredicate for IsLevel {
    fn check(&self, _ctx: &AuctionContext, call: &Call) -> bool {
        call.level() == Some(self.0)
    }
}

#[derive(Debug)]
pub struct MaxLevel(pub u8);
impl CallPredicate for MaxLevel {
    fn check(&self, _ctx: &AuctionContext, call: &Call) -> bool {
        call.level().is_some_and(|l| l <= self.0)
    }
}

#[derive(Debug)]
pub struct IsCall(pub u8, pub Strain);
impl CallPredicate for IsCall {
    fn check(&self, _ctx: &AuctionContext, call: &Call) -> bool {
        call.level() == Some(self.0) && call.strain() == Some(self.1)
    }
}

#[derive(Debug)]
pub struct IsStrain(pub Strain);
impl CallPredicate for IsStrain {
    fn check(&self, _ctx: &AuctionContext, call: &Call) -> bool {
        call.strain() == Some(self.0)
    }
}

#[derive(Debug)]
pub struct IsSuit;
impl CallPredicate for IsSuit {
    fn check(&self, _ctx: &AuctionContext, call: &Call) -> bool {
        call.suit().is_some()
    }
}

#[derive(Debug)]
pub struct IsMajorSuit;
impl CallPredicate for IsMajorSuit {
    fn check(&self, _ctx: &AuctionContext, call: &Call) -> bool {
        call.strain().is_some_and(|s| s.is_major())
    }
}

/// The call may legally be made now.
#[derive(Debug)]
pub struct IsLegal;
impl CallPredicate for IsLegal {
    fn check(&self, ctx: &AuctionContext, call: &Call) -> bool {
        ctx.is_legal(*call)
    }
}

/// The cheapest legal bid in its strain (not a jump).
#[derive(Debug)]
pub struct IsCheapest;
impl CallPredicate for IsCheapest {
    fn check(&self, ctx: &AuctionContext, call: &Call) -> bool {
        call.strain()
            .and_then(|strain| ctx.auction().minimum_bid_in(strain))
            == Some(*call)
    }
}

/// A suit nobody at the table has bid.
#[derive(Debug)]
pub struct IsNewSuit;
impl CallPredicate for IsNewSuit {
    fn check(&self, ctx: &AuctionContext, call: &Call) -> bool {
        call.suit().is_some_and(|suit| {
            ctx.auction()
                .calls
                .iter()
                .all(|c| c.suit() != Some(suit))
        })
    }
}

/// A bid in the suit partner last bid.
#[derive(Debug)]
pub struct IsPartnerSuit;
impl CallPredicate for IsPartnerSuit {
    fn check(&self, ctx: &AuctionContext, call: &Call) -> bool {
        call.suit().is_some()
            && ctx.partner_last_call().and_then(|c| c.suit()) == call.suit()
    }
}

/// A bid in the suit we opened.
#[derive(Debug)]
pub struct IsOpenedSuit;
impl CallPredicate for IsOpenedSuit {
    fn check(&self, ctx: &AuctionContext, call: &Call) -> bool {
        matches!(ctx.opening(), Some((Relation::Me, opening)) if opening.suit().is_some() && opening.suit() == call.suit())
    }
}

#[derive(Debug)]
pub struct IsAgreedSuit;
impl CallPredicate for IsAgreedSuit {
    fn check(&self, ctx: &AuctionContext, call: &Call) -> bool {
        call.suit().is_some() && call.suit() == ctx.agreed_suit()
    }
}

/// Accepting partner's transfer: the suit one step above theirs.
#[derive(Debug)]
pub struct CompletesTransfer;
impl CallPredicate for CompletesTransfer {
    fn check(&self, ctx: &AuctionContext, call: &Call) -> bool {
        let Some(Call::Bid { level, strain }) = ctx.partner_last_call() else {
            return false;
        };
        match Strain::ALL.get(strain.idx() + 1) {
            Some(&target) => target.is_major() && *call == Call::Bid { level, strain: target },
            None => false,
        }
    }
}

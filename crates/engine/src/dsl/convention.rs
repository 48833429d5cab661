use crate::belief::StrengthTemplate;
use crate::dsl::annotations::Annotation;
use crate::dsl::auction_predicates::AuctionPredicate;
use crate::dsl::call_predicates::CallPredicate;
use crate::dsl::hand_constraint::HandConstraint;
use crate::dsl::shows::Shows;
use crate::rules::{AuctionContext, Proposal, RuleMetadata};
use types::{Call, Hand, Strain};

/// How a convention chooses between several calls the hand qualifies for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Longest suit; equal fives (or equal four-card minors) go up the line.
    LongestSuit,
    /// The first qualifying call in candidate order.
    FirstListed,
}

/// A bidding convention in the rule DSL
pub trait Convention: Send + Sync {
    /// Human-readable reason. `{call}` is replaced by the call made.
    fn rationale(&self) -> &'static str;

    /// Auction criteria that must be met for this convention to apply
    fn auction_criteria(&self) -> Vec<Box<dyn AuctionPredicate>>;

    /// Call predicates that must be met for this convention to apply
    fn call_predicates(&self) -> Vec<Box<dyn CallPredicate>>;

    /// What this convention shows about the hand
    fn shows(&self) -> Vec<Box<dyn Shows>>;

    fn annotations(&self) -> Vec<Annotation> {
        vec![]
    }

    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::NATURAL
    }

    /// Calls this convention considers, in preference order.
    fn candidates(&self) -> Vec<Call> {
        all_calls()
    }

    fn preference(&self) -> Preference {
        Preference::LongestSuit
    }

    /// Constraints `call` shows here, or `None` if the convention does not
    /// make that call in this auction.
    fn constraints(&self, ctx: &AuctionContext, call: &Call) -> Option<Vec<HandConstraint>> {
        if !self.candidates().contains(call)
            || !self.call_predicates().iter().all(|p| p.check(ctx, call))
        {
            return None;
        }
        let shown = self
            .shows()
            .iter()
            .flat_map(|show| show.show(ctx, call))
            .collect();
        Some(HandConstraint::optimize(shown))
    }

    fn applies(&self, ctx: &AuctionContext) -> bool {
        self.auction_criteria().iter().all(|c| c.check(ctx))
    }
}

pub const fn bid(level: u8, strain: Strain) -> Call {
    Call::Bid { level, strain }
}

/// Pass, every bid from 1♣ to 7NT, then double and redouble.
pub fn all_calls() -> Vec<Call> {
    let mut calls = Vec::with_capacity(38);
    calls.push(Call::Pass);
    for level in 1..=7 {
        for strain in Strain::ALL {
            calls.push(bid(level, strain));
        }
    }
    calls.push(Call::Double);
    calls.push(Call::Redouble);
    calls
}

/// Choose a call for `hand` under `convention`.
pub fn evaluate<C: Convention + ?Sized>(
    convention: &C,
    hand: &Hand,
    ctx: &AuctionContext,
) -> Option<Proposal> {
    if !convention.applies(ctx) {
        return None;
    }
    let matching: Vec<Call> = convention
        .candidates()
        .into_iter()
        .filter(|call| {
            convention
                .constraints(ctx, call)
                .is_some_and(|shown| shown.iter().all(|c| c.check(hand)))
        })
        .collect();

    let call = match convention.preference() {
        Preference::FirstListed => matching.first().copied(),
        Preference::LongestSuit => select_best_from_group(&matching, hand),
    }?;

    Some(Proposal {
        call,
        rationale: convention.rationale().replace("{call}", &call.notation()),
        metadata: convention.metadata(),
    })
}

/// What `call` shows if `convention` made it here.
pub fn describe<C: Convention + ?Sized>(
    convention: &C,
    call: Call,
    ctx: &AuctionContext,
) -> Option<StrengthTemplate> {
    if !convention.applies(ctx) {
        return None;
    }
    let shown = convention.constraints(ctx, &call)?;
    Some(StrengthTemplate {
        range: HandConstraint::to_range(&shown),
        annotations: convention.annotations(),
    })
}

fn select_best_from_group(calls: &[Call], hand: &Hand) -> Option<Call> {
    let (&first, rest) = calls.split_first()?;
    let mut best = first;
    let mut best_len = call_suit_length(&best, hand);

    for &call in rest {
        let len = call_suit_length(&call, hand);
        if len > best_len {
            best = call;
            best_len = len;
        } else if len == best_len && call.strain() != best.strain() {
            // Bid the higher of two five-card suits, and diamonds with 4-4 in the minors.
            let both_minor = is_minor_suit_bid(&call) && is_minor_suit_bid(&best);
            if len >= 5 || (len >= 4 && both_minor) {
                best = call;
            }
        }
    }

    Some(best)
}

fn call_suit_length(call: &Call, hand: &Hand) -> u8 {
    call.suit().map(|s| hand.length(s)).unwrap_or(0)
}

fn is_minor_suit_bid(call: &Call) -> bool {
    call.strain().is_some_and(|s| s.is_minor())
}

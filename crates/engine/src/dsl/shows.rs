use crate::dsl::hand_constraint::HandConstraint;
use crate::dsl::point_ranges::PointRanges;
use crate::rules::{AskingSequence, AuctionContext};
use std::fmt::Debug;
use types::{Call, Relation, Shape, Suit};

pub trait Shows: Send + Sync + Debug {
    fn show(&self, ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint>;
}

#[derive(Debug)]
pub struct ShowMinHcp(pub u8);
impl Shows for ShowMinHcp {
    fn show(&self, _ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        vec![HandConstraint::MinHcp(self.0)]
    }
}

#[derive(Debug)]
pub struct ShowMaxHcp(pub u8);
impl Shows for ShowMaxHcp {
    fn show(&self, _ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        vec![HandConstraint::MaxHcp(self.0)]
    }
}

#[derive(Debug)]
pub struct ShowHcpRange(pub u8, pub u8);
impl Shows for ShowHcpRange {
    fn show(&self, _ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        vec![
            HandConstraint::MinHcp(self.0),
            HandConstraint::MaxHcp(self.1),
        ]
    }
}

#[derive(Debug)]
pub struct ShowBalanced;
impl Shows for ShowBalanced {
    fn show(&self, _ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        vec![HandConstraint::MaxUnbalancedness(Shape::Balanced)]
    }
}

#[derive(Debug)]
pub struct ShowMinLength(pub Suit, pub u8);
impl Shows for ShowMinLength {
    fn show(&self, _ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        vec![HandConstraint::MinLength(self.0, self.1)]
    }
}

/// Length in the suit of the call itself.
#[derive(Debug)]
pub struct ShowMinSuitLength(pub u8);
impl Shows for ShowMinSuitLength {
    fn show(&self, _ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        call.suit()
            .map(|suit| vec![HandConstraint::MinLength(suit, self.0)])
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct ShowMaxSuitLength(pub u8);
impl Shows for ShowMaxSuitLength {
    fn show(&self, _ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        call.suit()
            .map(|suit| vec![HandConstraint::MaxLength(suit, self.0)])
            .unwrap_or_default()
    }
}

/// Five-card majors; three-card minors.
#[derive(Debug)]
pub struct ShowOpeningSuitLength;
impl Shows for ShowOpeningSuitLength {
    fn show(&self, _ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        call.suit()
            .map(|suit| {
                let length = if suit.is_major() { 5 } else { 3 };
                vec![HandConstraint::MinLength(suit, length)]
            })
            .unwrap_or_default()
    }
}

/// Rule of two and three: a preempt at level n promises n + 4 cards.
#[derive(Debug)]
pub struct ShowPreemptLength;
impl Shows for ShowPreemptLength {
    fn show(&self, _ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        match (call.level(), call.suit()) {
            (Some(level), Some(suit)) => vec![HandConstraint::MinLength(suit, level + 4)],
            _ => vec![],
        }
    }
}

#[derive(Debug)]
pub struct ShowGoodSuit;
impl Shows for ShowGoodSuit {
    fn show(&self, _ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        call.suit()
            .map(|suit| vec![HandConstraint::GoodSuit(suit)])
            .unwrap_or_default()
    }
}

/// Requires a stopper in each suit the opponents have shown.
/// Used for notrump overcalls.
#[derive(Debug)]
pub struct ShowStopperInOpponentSuit;
impl Shows for ShowStopperInOpponentSuit {
    fn show(&self, ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        ctx.suits_bid_by(Relation::Opponent)
            .into_iter()
            .map(HandConstraint::StopperIn)
            .collect()
    }
}

/// Shows 3+ cards in each suit that opponents have NOT shown, and
/// shortness in theirs. Used for takeout doubles.
#[derive(Debug)]
pub struct ShowSupportForUnbidSuits;
impl Shows for ShowSupportForUnbidSuits {
    fn show(&self, ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        let theirs = ctx.suits_bid_by(Relation::Opponent);
        Suit::ALL
            .iter()
            .map(|&suit| {
                if theirs.contains(&suit) {
                    HandConstraint::MaxLength(suit, 2)
                } else {
                    HandConstraint::MinLength(suit, 3)
                }
            })
            .collect()
    }
}

/// Overcall strength grows with the level.
#[derive(Debug)]
pub struct ShowOvercallValues;
impl Shows for ShowOvercallValues {
    fn show(&self, _ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        let min = match call.level() {
            Some(1) => 8,
            _ => 11,
        };
        vec![HandConstraint::MinHcp(min), HandConstraint::MaxHcp(16)]
    }
}

/// A transfer shows five of the suit above the one bid.
#[derive(Debug)]
pub struct ShowTransferSuit;
impl Shows for ShowTransferSuit {
    fn show(&self, _ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        call.suit()
            .and_then(|suit| Suit::ALL.get(suit.idx() + 1))
            .map(|&target| vec![HandConstraint::MinLength(target, 5)])
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct ShowFourCardMajor;
impl Shows for ShowFourCardMajor {
    fn show(&self, _ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        vec![HandConstraint::LengthInEither(Suit::Hearts, Suit::Spades, 4)]
    }
}

#[derive(Debug)]
pub struct ShowNoFourCardMajor;
impl Shows for ShowNoFourCardMajor {
    fn show(&self, _ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        vec![
            HandConstraint::MaxLength(Suit::Hearts, 3),
            HandConstraint::MaxLength(Suit::Spades, 3),
        ]
    }
}

/// Answers to Stayman: 2♥ with four hearts, 2♠ with four spades and not
/// four hearts, 2♦ denies both.
#[derive(Debug)]
pub struct ShowStaymanAnswer;
impl Shows for ShowStaymanAnswer {
    fn show(&self, _ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        match call.suit() {
            Some(Suit::Hearts) => vec![HandConstraint::MinLength(Suit::Hearts, 4)],
            Some(Suit::Spades) => vec![
                HandConstraint::MinLength(Suit::Spades, 4),
                HandConstraint::MaxLength(Suit::Hearts, 3),
            ],
            Some(Suit::Diamonds) => vec![
                HandConstraint::MaxLength(Suit::Hearts, 3),
                HandConstraint::MaxLength(Suit::Spades, 3),
            ],
            _ => vec![],
        }
    }
}

/// Enough, with partner's expected values, for a small slam.
#[derive(Debug)]
pub struct ShowSlamValues;
impl Shows for ShowSlamValues {
    fn show(&self, ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        let partner = ctx.partner_estimate().floor() as u8;
        vec![HandConstraint::MinHcp(
            PointRanges::SLAM_THRESHOLD.saturating_sub(partner),
        )]
    }
}

/// Step answer to an ace ask.
#[derive(Debug)]
pub struct ShowAceCount;
impl Shows for ShowAceCount {
    fn show(&self, _ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        AskingSequence::aces_shown(*call)
            .map(|aces| vec![HandConstraint::AceCount(aces)])
            .unwrap_or_default()
    }
}

/// The asker's placement after the ace answer: stop at five when two aces
/// are missing, bid six when at most one is, seven with all four and
/// grand-slam values.
#[derive(Debug)]
pub struct ShowSignOffAces;
impl Shows for ShowSignOffAces {
    fn show(&self, ctx: &AuctionContext, call: &Call) -> Vec<HandConstraint> {
        let Some(partner) = ctx
            .asking()
            .and_then(|seq| seq.response(ctx.auction()))
            .and_then(AskingSequence::aces_shown)
        else {
            return vec![];
        };
        let (min, max): (u8, u8) = match call.level() {
            Some(5) => (0, 2),
            Some(6) => (3, 4),
            Some(7) => (4, 4),
            _ => return vec![],
        };
        let mut shows = vec![HandConstraint::PartnershipAces { partner, min, max }];
        if call.level() == Some(7) {
            let partner = ctx.partner_estimate().floor() as u8;
            shows.push(HandConstraint::MinHcp(
                PointRanges::GRAND_SLAM_THRESHOLD.saturating_sub(partner),
            ));
        }
        shows
    }
}

/// Support for the suit partner opened, whatever the call.
#[derive(Debug)]
pub struct ShowSupportForPartnerSuit(pub u8);
impl Shows for ShowSupportForPartnerSuit {
    fn show(&self, ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        match ctx.opening() {
            Some((Relation::Partner, opening)) => opening
                .suit()
                .map(|suit| vec![HandConstraint::MinLength(suit, self.0)])
                .unwrap_or_default(),
            _ => vec![],
        }
    }
}

/// Length and honors in the suit the opponents have bid.
#[derive(Debug)]
pub struct ShowTrumpStack;
impl Shows for ShowTrumpStack {
    fn show(&self, ctx: &AuctionContext, _call: &Call) -> Vec<HandConstraint> {
        match ctx.last_bid() {
            Some((Relation::Opponent, call)) => match call.suit() {
                Some(suit) => vec![
                    HandConstraint::MinLength(suit, 4),
                    HandConstraint::GoodSuit(suit),
                    HandConstraint::MinHcp(10),
                ],
                None => vec![HandConstraint::MinHcp(15)],
            },
            _ => vec![],
        }
    }
}

//! Deterministic limits on how high a partnership may bid.

use crate::belief::BeliefModel;
use crate::config::SanityConfig;
use crate::rules::{AskingSequence, RuleMetadata};
use serde::Serialize;
use types::{Auction, Call, Hand};

/// Preempts may ignore the strength table up to this level.
const PREEMPT_CEILING: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanityVerdict {
    pub allow: bool,
    pub call: Call,
    pub reason: String,
}

impl SanityVerdict {
    fn allow(call: Call, reason: impl Into<String>) -> Self {
        Self {
            allow: true,
            call,
            reason: reason.into(),
        }
    }

    fn reject(reason: String) -> Self {
        Self {
            allow: false,
            call: Call::Pass,
            reason,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SanityChecker {
    config: SanityConfig,
}

impl SanityChecker {
    pub fn new(config: SanityConfig) -> Self {
        Self { config }
    }

    /// Highest level the partnership may reach with `combined` points.
    pub fn max_safe_level(&self, combined: u8) -> u8 {
        let level = self.config.max_safe_level(combined);
        if level >= 6 && combined < self.config.small_slam_threshold {
            5
        } else {
            level
        }
    }

    pub fn check(
        &self,
        call: Call,
        hand: &Hand,
        belief: &BeliefModel,
        ledger: &Auction,
        metadata: &RuleMetadata,
    ) -> SanityVerdict {
        let Call::Bid { level, strain } = call else {
            return SanityVerdict::allow(call, "not a bid");
        };

        if metadata.is_asking_sequence_slot && in_asking_slot(ledger) {
            return SanityVerdict::allow(call, "answer within an active asking sequence");
        }

        let partner = ledger.current_player().partner();
        let combined = (f32::from(hand.hcp()) + belief.estimate(partner)).floor() as u8;
        let mut cap = self.max_safe_level(combined);
        if metadata.bypass_strength_check && level <= PREEMPT_CEILING {
            cap = cap.max(PREEMPT_CEILING);
        }
        if level > cap {
            return SanityVerdict::reject(format!(
                "combined strength {combined} supports at most level {cap}; {call} replaced by Pass"
            ));
        }

        if let Some(suit) = strain.to_suit() {
            let game_in_major = level == 4 && suit.is_major();
            let partner_shown = belief.range(partner).shape().min_length(suit);
            if game_in_major
                && hand.length(suit) < 3
                && partner_shown < 5
                && !metadata.bypass_suit_length
            {
                return SanityVerdict::reject(format!(
                    "{call} with {} trumps and no known fit; replaced by Pass",
                    hand.length(suit)
                ));
            }
        }

        SanityVerdict::allow(call, format!("within level {cap} for combined {combined}"))
    }
}

/// The next call fills the response or sign-off slot of an ace ask.
fn in_asking_slot(ledger: &Auction) -> bool {
    AskingSequence::detect(ledger)
        .and_then(|seq| seq.slot_for(ledger.len()))
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::{CallInterpreter, StrengthRange, StrengthTemplate};
    use crate::config::BeliefConfig;
    use crate::rules::AuctionContext;
    use types::{Position, Strain, Suit};

    /// Every bid shows exactly the given range.
    struct Shows(u8, u8);
    impl CallInterpreter for Shows {
        fn interpret(&self, call: Call, _ctx: &AuctionContext) -> Option<StrengthTemplate> {
            call.is_bid().then(|| StrengthTemplate {
                range: StrengthRange::hcp(self.0, self.1).unwrap_or_default(),
                annotations: vec![],
            })
        }
    }

    fn belief(ledger: &Auction, min: u8, max: u8) -> BeliefModel {
        BeliefModel::update(ledger, &Shows(min, max), BeliefConfig::default())
    }

    fn call(s: &str) -> Call {
        s.parse().unwrap()
    }

    #[test]
    fn specials_always_allowed() {
        let ledger = Auction::bidding(Position::North, "1S 4H");
        let checker = SanityChecker::default();
        let hand = Hand::parse("32.432.5432.5432");
        for c in [Call::Pass, Call::Double, Call::Redouble] {
            assert!(checker.check(c, &hand, &belief(&ledger, 0, 0), &ledger, &RuleMetadata::NATURAL).allow);
        }
    }

    #[test]
    fn slam_without_values_is_rejected() {
        // Partner shows 11-13 (estimate 12); we hold 12. Combined 24.
        let ledger = Auction::bidding(Position::North, "1S P 2S P");
        let hand = Hand::parse("A32.K32.Q32.QJ32");
        assert_eq!(hand.hcp(), 12);
        let verdict = SanityChecker::default().check(
            call("6S"),
            &hand,
            &belief(&ledger, 11, 13),
            &ledger,
            &RuleMetadata::NATURAL,
        );
        assert!(!verdict.allow);
        assert_eq!(verdict.call, Call::Pass);
        assert!(verdict.reason.contains("combined strength 24"));
    }

    #[test]
    fn table_lookup() {
        let checker = SanityChecker::default();
        assert_eq!(checker.max_safe_level(12), 2);
        assert_eq!(checker.max_safe_level(24), 3);
        assert_eq!(checker.max_safe_level(26), 4);
        assert_eq!(checker.max_safe_level(30), 5);
        assert_eq!(checker.max_safe_level(33), 6);
        assert_eq!(checker.max_safe_level(37), 7);
        let strict = SanityChecker::new(SanityConfig {
            small_slam_threshold: 35,
            ..SanityConfig::default()
        });
        assert_eq!(strict.max_safe_level(34), 5);
    }

    #[test]
    fn asking_slot_is_exempt_only_in_the_slot() {
        // 4NT asked by North; South answers.
        let ledger = Auction::bidding(Position::North, "1S P 3S P 4N P");
        let weak = Hand::parse("32.432.5432.Q432");
        let model = belief(&ledger, 0, 5);
        let checker = SanityChecker::default();
        let answer = checker.check(call("5C"), &weak, &model, &ledger, &RuleMetadata::asking_slot());
        assert!(answer.allow);

        // Flag without an active slot does not help.
        let later = Auction::bidding(Position::North, "1S P 3S P 4N P 5C P 5S P");
        let verdict = checker.check(call("6S"), &weak, &model, &later, &RuleMetadata::asking_slot());
        assert!(!verdict.allow);

        // Slot without the flag does not help either.
        let verdict = checker.check(call("5C"), &weak, &model, &ledger, &RuleMetadata::NATURAL);
        assert!(!verdict.allow);
    }

    #[test]
    fn preempts_reach_level_four_at_most() {
        let ledger = Auction::new(Position::North);
        let hand = Hand::parse("2.32.KQJ5432.432");
        let preempt = RuleMetadata {
            bypass_strength_check: true,
            ..RuleMetadata::NATURAL
        };
        let model = BeliefModel::default();
        let checker = SanityChecker::default();
        assert!(checker.check(call("3H"), &hand, &model, &ledger, &preempt).allow);
        assert!(!checker.check(call("3H"), &hand, &model, &ledger, &RuleMetadata::NATURAL).allow);
        assert!(!checker.check(call("5H"), &hand, &model, &ledger, &preempt).allow);
    }

    #[test]
    fn game_in_a_major_needs_trumps() {
        let ledger = Auction::bidding(Position::North, "1N P");
        let hand = Hand::parse("AK32.KQ32.32.K32");
        let model = belief(&ledger, 15, 17);
        let checker = SanityChecker::default();
        let verdict = checker.check(call("4H"), &hand, &model, &ledger, &RuleMetadata::NATURAL);
        assert!(!verdict.allow);
        assert!(verdict.reason.contains("trumps"));
        let bypass = RuleMetadata {
            bypass_suit_length: true,
            ..RuleMetadata::NATURAL
        };
        assert!(checker.check(call("4H"), &hand, &model, &ledger, &bypass).allow);
        assert!(checker.check(call("4S"), &hand, &model, &ledger, &RuleMetadata::NATURAL).allow);
    }

    #[test]
    fn fit_shown_by_partner_allows_short_trumps() {
        let ledger = Auction::bidding(Position::North, "1S P");
        let hand = Hand::parse("AK32.KQ32.K32.32");
        let mut model = belief(&ledger, 12, 14);
        let five_spades = StrengthTemplate {
            range: StrengthRange::universal().with_shape(
                crate::belief::ShapeSignals::default().with_min_length(Suit::Spades, 5),
            ),
            annotations: vec![],
        };
        model.apply(Position::North, Call::Bid { level: 1, strain: Strain::Spades }, &five_spades);
        let checker = SanityChecker::default();
        assert!(checker.check(call("4S"), &hand, &model, &ledger, &RuleMetadata::NATURAL).allow);
    }

    #[test]
    fn approved_calls_stay_approved() {
        let ledger = Auction::bidding(Position::North, "1N P");
        let hand = Hand::parse("K32.Q32.KJ32.Q32");
        let model = belief(&ledger, 15, 17);
        let checker = SanityChecker::default();
        for candidate in ["2N", "3N", "6N", "P"] {
            let first = checker.check(call(candidate), &hand, &model, &ledger, &RuleMetadata::NATURAL);
            let second = checker.check(first.call, &hand, &model, &ledger, &RuleMetadata::NATURAL);
            assert!(second.allow);
            assert_eq!(first.call, second.call);
        }
    }
}

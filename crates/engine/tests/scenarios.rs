use engine::belief::{StrengthRange, StrengthTemplate};
use engine::rules::RuleMetadata;
use engine::{
    BeliefModel, Candidate, Correction, DecisionPipeline, EngineConfig, LegalityCorrector,
    SanityChecker, Stage,
};
use types::{Auction, Call, Hand, Position, Strain};

fn pipeline() -> DecisionPipeline {
    DecisionPipeline::standard(EngineConfig::default()).unwrap()
}

fn ledger(dealer: Position, tokens: &[&str]) -> Auction {
    Auction::from_tokens(dealer, tokens).unwrap()
}

#[test]
fn transfer_over_partners_notrump() {
    // Partner opened 1NT; eight points and five hearts.
    let hand = Hand::parse("32.Q32.KJ432.Q32");
    assert_eq!(hand.hcp(), 8);
    let record = pipeline().decide(&ledger(Position::North, &["1NT", "Pass"]), &hand);
    assert_eq!(record.final_call.notation(), "2♦");
    assert_ne!(record.final_call.notation(), "2♥");
    assert!(!record.was_overridden());
}

#[test]
fn unreachable_notrump_becomes_pass() {
    let ledger = ledger(Position::North, &["1♠", "Pass", "4♠", "Pass"]);
    assert_eq!(
        LegalityCorrector::minimum_legal(&ledger).map(Call::notation),
        Some("4NT".to_string())
    );
    let candidate = Candidate {
        call: "2NT".parse().unwrap(),
        ..Candidate::no_rule()
    };
    let correction = LegalityCorrector::default().correct(&candidate, &ledger);
    assert!(matches!(correction, Correction::BeyondCap { .. }));
    assert_eq!(correction.call(), Call::Pass);
}

#[test]
fn slam_at_twenty_four_combined_is_stopped() {
    let ledger = ledger(Position::North, &["1♠", "Pass", "2♠", "Pass"]);
    let mut belief = BeliefModel::default();
    belief.apply(
        Position::North,
        "1S".parse().unwrap(),
        &StrengthTemplate {
            range: StrengthRange::hcp(11, 13).unwrap(),
            annotations: vec![],
        },
    );
    let hand = Hand::parse("A32.K32.Q32.QJ32");
    let six_spades = Call::bid(6, Strain::Spades).unwrap();
    let verdict =
        SanityChecker::default().check(six_spades, &hand, &belief, &ledger, &RuleMetadata::NATURAL);
    assert!(!verdict.allow);
    assert_eq!(verdict.call, Call::Pass);
}

#[test]
fn nothing_applies_so_pass() {
    // Opener's rebid after a single raise is outside the catalog.
    let ledger = ledger(Position::North, &["1♠", "Pass", "2♠", "Pass"]);
    let record = pipeline().decide(&ledger, &Hand::parse("K32.A2.K32.AQ432"));
    assert_eq!(record.final_call, Call::Pass);
    assert_eq!(record.rationale, "no applicable rule");
    assert_eq!(record.proposed.rule, None);
}

#[test]
fn blackwood_answer_and_sign_off_pass_the_cap() {
    let pipeline = pipeline();

    // Responder's weak hand with one ace answers 5♦ even though the
    // partnership estimate alone would stop at the three level.
    let ask = ledger(Position::North, &["1♠", "Pass", "3♠", "Pass", "4NT", "Pass"]);
    let answer = pipeline.decide(&ask, &Hand::parse("32.A32.5432.J432"));
    assert_eq!(answer.final_call.notation(), "5♦");
    assert!(answer.proposed.metadata.is_asking_sequence_slot);
    assert!(answer.override_at(Stage::Sanity).is_none());
    assert!(!answer.review.changed);

    // Asker holds three aces, so all four are accounted for but not the
    // grand-slam strength: six.
    let mut sign_off_ledger = ask.clone();
    sign_off_ledger.add_call(answer.final_call);
    sign_off_ledger.add_call(Call::Pass);
    let sign_off = pipeline.decide(&sign_off_ledger, &Hand::parse("A2.A2.KQ2.AKJ432"));
    assert_eq!(sign_off.final_call.notation(), "6♠");
    assert!(sign_off.override_at(Stage::Sanity).is_none());
}

#[test]
fn asking_flag_outside_the_slot_is_capped() {
    // Two calls after the sign-off slot nothing is exempt any more.
    let ledger = ledger(
        Position::North,
        &["1♠", "Pass", "3♠", "Pass", "4NT", "Pass", "5♦", "Pass", "5♠", "Pass"],
    );
    let verdict = SanityChecker::default().check(
        Call::bid(6, Strain::Spades).unwrap(),
        &Hand::parse("32.A32.5432.J432"),
        &BeliefModel::default(),
        &ledger,
        &RuleMetadata::asking_slot(),
    );
    assert!(!verdict.allow);
}

//! One turn, start to finish.
//!
//! Stages run in a fixed order and each one sees only the previous stage's
//! output plus read-only context: belief update, rule selection, legality
//! correction, sanity check, conflict review. The ledger is never mutated
//! here; the caller that owns it appends the final call.

use crate::belief::BeliefModel;
use crate::config::EngineConfig;
use crate::conflict::{ConflictResolver, QuickTrickOracle, TrickOracle};
use crate::legality::LegalityCorrector;
use crate::record::{Override, Stage, TurnRecord};
use crate::rules::{catalog, AuctionContext, RegistryError, RuleRegistry};
use crate::sanity::SanityChecker;
use std::sync::Arc;
use thiserror::Error;
use types::{Auction, Board, Hand, Position};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("board has no hand for {0}")]
    MissingHand(Position),
}

#[derive(Clone)]
pub struct DecisionPipeline {
    registry: Arc<RuleRegistry>,
    config: EngineConfig,
    legality: LegalityCorrector,
    sanity: SanityChecker,
    conflict: ConflictResolver,
}

impl DecisionPipeline {
    pub fn new(
        registry: Arc<RuleRegistry>,
        config: EngineConfig,
        oracle: Option<Arc<dyn TrickOracle>>,
    ) -> Self {
        Self {
            legality: LegalityCorrector::new(&config.legality),
            sanity: SanityChecker::new(config.sanity.clone()),
            conflict: ConflictResolver::new(config.conflict, oracle),
            registry,
            config,
        }
    }

    /// The standard catalog with the heuristic trick oracle.
    pub fn standard(config: EngineConfig) -> Result<Self, RegistryError> {
        let registry = catalog::standard().build(&config.priorities)?;
        Ok(Self::new(
            Arc::new(registry),
            config,
            Some(Arc::new(QuickTrickOracle)),
        ))
    }

    pub fn with_oracle(mut self, oracle: Arc<dyn TrickOracle>) -> Self {
        self.conflict = ConflictResolver::new(self.config.conflict, Some(oracle));
        self
    }

    pub fn without_oracle(mut self) -> Self {
        self.conflict = ConflictResolver::new(self.config.conflict, None);
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// What the registry's rules have shown for every seat so far.
    pub fn belief(&self, ledger: &Auction) -> BeliefModel {
        BeliefModel::update(ledger, self.registry.as_ref(), self.config.belief)
    }

    /// Decide the next call on `ledger` for the seat holding `hand`.
    pub fn decide(&self, ledger: &Auction, hand: &Hand) -> TurnRecord {
        let seat = ledger.current_player();
        let belief = self.belief(ledger);
        let ctx = AuctionContext::new(ledger, &belief);

        let proposed = self.registry.select(hand, &ctx);
        tracing::debug!(
            %seat,
            call = %proposed.call,
            rule = ?proposed.rule,
            also_matched = ?proposed.also_matched,
            "selected"
        );

        let mut overrides = Vec::new();
        let corrected = self.legality.correct(&proposed, ledger);
        if corrected.is_change() {
            overrides.push(Override {
                stage: Stage::Legality,
                from: proposed.call,
                to: corrected.call(),
                reason: corrected.to_string(),
            });
        }

        let sanity = self
            .sanity
            .check(corrected.call(), hand, &belief, ledger, &proposed.metadata);
        if !sanity.allow {
            overrides.push(Override {
                stage: Stage::Sanity,
                from: corrected.call(),
                to: sanity.call,
                reason: sanity.reason.clone(),
            });
        }

        let review = self
            .conflict
            .review(sanity.call, &proposed.metadata, hand, &belief, ledger);
        if review.changed {
            overrides.push(Override {
                stage: Stage::Conflict,
                from: sanity.call,
                to: review.call,
                reason: review.reason.clone(),
            });
        }
        for o in &overrides {
            tracing::debug!(stage = %o.stage, from = %o.from, to = %o.to, reason = %o.reason, "override");
        }

        let final_call = review.call;
        debug_assert!(
            ledger.is_finished() || ledger.is_legal_next(final_call),
            "pipeline produced illegal {final_call}"
        );
        let record = TurnRecord {
            seat,
            rationale: TurnRecord::rationale_for(&proposed, &overrides),
            proposed,
            corrected,
            sanity,
            review,
            final_call,
            overrides,
        };
        tracing::info!(
            seat = %record.seat,
            call = %record.final_call,
            rule = ?record.proposed.rule,
            overrides = record.overrides.len(),
            rationale = %record.rationale,
            "turn decided"
        );
        record
    }

    /// Bid a whole board from an empty ledger, each seat using its own hand.
    pub fn bid_out(&self, board: &Board) -> Result<(Auction, Vec<TurnRecord>), PipelineError> {
        for position in Position::ALL {
            if board.get_hand(position).is_none() {
                return Err(PipelineError::MissingHand(position));
            }
        }
        self.continue_auction(board, Auction::new(board.dealer))
    }

    /// Bid the rest of `ledger` for every seat on `board`.
    pub fn continue_auction(
        &self,
        board: &Board,
        mut ledger: Auction,
    ) -> Result<(Auction, Vec<TurnRecord>), PipelineError> {
        let mut records = Vec::new();
        while !ledger.is_finished() {
            let seat = ledger.current_player();
            let hand = board.get_hand(seat).ok_or(PipelineError::MissingHand(seat))?;
            let record = self.decide(&ledger, hand);
            ledger.add_call(record.final_call);
            records.push(record);
        }
        Ok((ledger, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::StrengthTemplate;
    use crate::config::PriorityTable;
    use crate::rules::{
        PriorityTier, Proposal, RegistryBuilder, RuleId, RuleMetadata, RuleModule,
    };
    use std::collections::HashMap;
    use types::{Call, Vulnerability};

    /// Proposes the same call on every turn.
    struct Always(Option<Call>);

    impl RuleModule for Always {
        fn id(&self) -> RuleId {
            RuleId::OneSuitOpening
        }

        fn tier(&self) -> PriorityTier {
            PriorityTier::Constructive
        }

        fn evaluate(&self, _hand: &Hand, _ctx: &AuctionContext) -> Option<Proposal> {
            self.0.map(|call| Proposal {
                call,
                rationale: "always".to_string(),
                metadata: RuleMetadata::NATURAL,
            })
        }

        fn describe(&self, _call: Call, _ctx: &AuctionContext) -> Option<StrengthTemplate> {
            None
        }
    }

    fn always(call: Option<&str>) -> DecisionPipeline {
        let registry = RegistryBuilder::new()
            .register(Box::new(Always(call.map(|c| c.parse().unwrap()))))
            .build(&PriorityTable::default())
            .unwrap();
        DecisionPipeline::new(Arc::new(registry), EngineConfig::default(), None)
    }

    fn pipeline() -> DecisionPipeline {
        DecisionPipeline::standard(EngineConfig::default()).unwrap()
    }

    fn call(s: &str) -> Call {
        s.parse().unwrap()
    }

    #[test]
    fn opens_one_notrump() {
        let ledger = Auction::new(Position::North);
        let record = pipeline().decide(&ledger, &Hand::parse("KQ2.AJ2.K32.Q432"));
        assert_eq!(record.final_call, call("1N"));
        assert_eq!(record.seat, Position::North);
        assert_eq!(record.proposed.rule, Some(RuleId::OneNotrumpOpening));
        assert!(!record.was_overridden());
    }

    #[test]
    fn weak_hand_passes_with_the_rule_rationale() {
        let ledger = Auction::new(Position::North);
        let record = pipeline().decide(&ledger, &Hand::parse("432.432.5432.J32"));
        assert_eq!(record.final_call, Call::Pass);
        assert_eq!(record.proposed.rule, Some(RuleId::OpeningPass));
    }

    #[test]
    fn no_rule_passes() {
        let ledger = Auction::new(Position::North);
        let record = always(None).decide(&ledger, &Hand::parse("AK2.KQ2.AK2.K432"));
        assert_eq!(record.final_call, Call::Pass);
        assert_eq!(record.rationale, "no applicable rule");
        assert_eq!(record.proposed.rule, None);
    }

    #[test]
    fn unreachable_candidate_is_corrected_to_pass() {
        let ledger = Auction::bidding(Position::North, "1S P 4S P");
        let record = always(Some("2N")).decide(&ledger, &Hand::parse("32.K32.Q432.K432"));
        assert_eq!(record.final_call, Call::Pass);
        let legality = record.override_at(Stage::Legality).unwrap();
        assert_eq!(legality.from, call("2N"));
        assert_eq!(legality.to, Call::Pass);
        assert!(record.rationale.starts_with("always; "));
    }

    #[test]
    fn slam_without_values_is_stopped_by_sanity() {
        let ledger = Auction::bidding(Position::North, "1S P");
        let record = always(Some("6S")).decide(&ledger, &Hand::parse("A32.K32.Q32.QJ32"));
        assert_eq!(record.final_call, Call::Pass);
        assert!(record.override_at(Stage::Legality).is_none());
        assert_eq!(record.override_at(Stage::Sanity).unwrap().from, call("6S"));
        assert!(!record.sanity.allow);
    }

    #[test]
    fn finished_auction_passes() {
        let ledger = Auction::bidding(Position::North, "P P P P");
        let record = pipeline().decide(&ledger, &Hand::parse("AK2.KQ2.AK2.K432"));
        assert_eq!(record.final_call, Call::Pass);
    }

    #[test]
    fn bids_out_a_board() {
        let hands = HashMap::from([
            (Position::North, Hand::parse("KQ2.AJ2.K32.Q432")),
            (Position::East, Hand::parse("J43.Q54.QJ4.K765")),
            (Position::South, Hand::parse("765.763.A76.AJT9")),
            (Position::West, Hand::parse("AT98.KT98.T985.8")),
        ]);
        let board = Board::new(Position::North, Vulnerability::None, hands);
        let (auction, records) = pipeline().bid_out(&board).unwrap();
        assert!(auction.is_finished());
        assert!(auction.is_valid());
        assert_eq!(records.len(), auction.len());
        assert_eq!(auction.calls[0], call("1N"));
        for (record, (seat, made)) in records.iter().zip(auction.iter()) {
            assert_eq!(record.seat, seat);
            assert_eq!(record.final_call, *made);
        }
    }

    #[test]
    fn bidding_out_is_deterministic() {
        let hands = HashMap::from([
            (Position::North, Hand::parse("KQ2.AJ2.K32.Q432")),
            (Position::East, Hand::parse("J43.Q54.QJ4.K765")),
            (Position::South, Hand::parse("765.763.A76.AJT9")),
            (Position::West, Hand::parse("AT98.KT98.T985.8")),
        ]);
        let board = Board::new(Position::East, Vulnerability::Both, hands);
        // Generous deadline so timing cannot cut sampling short.
        let mut config = EngineConfig::default();
        config.conflict.timeout_ms = 60_000;
        let pipeline = DecisionPipeline::standard(config).unwrap();
        let first = pipeline.bid_out(&board).unwrap();
        let second = pipeline.bid_out(&board).unwrap();
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn missing_hands_are_reported() {
        let board = Board::new(Position::North, Vulnerability::None, HashMap::new());
        assert_eq!(
            pipeline().bid_out(&board).unwrap_err(),
            PipelineError::MissingHand(Position::North)
        );
    }
}

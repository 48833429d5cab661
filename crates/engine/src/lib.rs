pub mod belief;
pub mod config;
pub mod conflict;
pub mod dsl;
pub mod legality;
pub mod pipeline;
pub mod record;
pub mod rules;
pub mod sanity;

pub use belief::{BeliefModel, StrengthRange};
pub use config::{ConfigError, EngineConfig};
pub use conflict::{ConflictResolver, Deal, OracleError, QuickTrickOracle, Review, TrickOracle};
pub use legality::{Correction, LegalityCorrector};
pub use pipeline::{DecisionPipeline, PipelineError};
pub use record::{Override, Stage, TurnRecord};
pub use rules::{Candidate, RuleRegistry};
pub use sanity::{SanityChecker, SanityVerdict};

use rand::seq::SliceRandom;
use rules::AuctionContext;
use serde::Serialize;
use std::collections::HashMap;
use types::io::identifier;
use types::{Auction, Board, Call, Card, Hand, Position, Vulnerability};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallInterpretation {
    pub call_name: String,
    pub rule_name: String,
    pub description: String,
}

impl CallInterpretation {
    fn pass() -> Self {
        Self {
            call_name: Call::Pass.render(),
            rule_name: String::new(),
            description: String::new(),
        }
    }
}

/// Parse a comma- or space-separated call string (e.g. "1C,P,1D") into calls.
/// Unparseable tokens are skipped.
pub fn parse_calls(calls_string: &str) -> Vec<Call> {
    calls_string
        .split([',', ' '])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<Call>().ok())
        .collect()
}

/// Every legal next call after `calls_string`, with what the standard
/// catalog says it would show.
pub fn get_interpretations(calls_string: &str, dealer: &str) -> Vec<CallInterpretation> {
    let dealer = dealer
        .chars()
        .next()
        .and_then(Position::from_char)
        .unwrap_or(Position::North);
    let mut auction = Auction::new(dealer);
    for call in parse_calls(calls_string) {
        if auction.is_legal_next(call) {
            auction.add_call(call);
        }
    }
    let Ok(pipeline) = DecisionPipeline::standard(EngineConfig::default()) else {
        return Vec::new();
    };
    let belief = pipeline.belief(&auction);
    let ctx = AuctionContext::new(&auction, &belief);

    let mut legal_calls = auction.legal_calls();
    legal_calls.sort();
    legal_calls
        .into_iter()
        .map(|call| {
            let explained = pipeline.registry().explain(call, &ctx);
            CallInterpretation {
                call_name: call.render(),
                rule_name: explained
                    .as_ref()
                    .map(|(id, _)| id.to_string())
                    .unwrap_or_default(),
                description: explained
                    .map(|(_, template)| template.range.to_string())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

fn decide_for_identifier(identifier: &str) -> Option<TurnRecord> {
    let (board, auction) = identifier::import_board(identifier).ok()?;
    let auction = auction.unwrap_or_else(|| Auction::new(board.dealer));
    let hand = board.get_hand(auction.current_player())?;
    let pipeline = DecisionPipeline::standard(EngineConfig::default()).ok()?;
    Some(pipeline.decide(&auction, hand))
}

/// The next call for a board in identifier format, as a compact call string.
/// Anything unreadable yields "P".
pub fn get_next_call(identifier: &str) -> String {
    decide_for_identifier(identifier)
        .map(|record| record.final_call.render())
        .unwrap_or_else(|| Call::Pass.render())
}

/// Like [`get_next_call`], with the deciding rule and its rationale.
pub fn get_suggested_call(identifier: &str) -> CallInterpretation {
    let Some(record) = decide_for_identifier(identifier) else {
        return CallInterpretation::pass();
    };
    CallInterpretation {
        call_name: record.final_call.render(),
        rule_name: record
            .proposed
            .rule
            .map(|id| id.to_string())
            .unwrap_or_else(|| "no rule".to_string()),
        description: record.rationale,
    }
}

pub fn generate_random_board(board_number: u32, rng: &mut impl rand::Rng) -> Board {
    let mut deck = Card::deck();
    deck.shuffle(rng);

    let hands: HashMap<Position, Hand> = Position::ALL
        .into_iter()
        .zip(deck.chunks(13))
        .map(|(position, chunk)| (position, Hand::new(chunk.to_vec())))
        .collect();

    Board::new(
        Position::dealer_from_board_number(board_number),
        Vulnerability::from_board_number(board_number),
        hands,
    )
}

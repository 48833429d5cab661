use anyhow::{bail, Context, Result};
use engine::{BeliefModel, TurnRecord};
use std::collections::HashMap;
use std::fmt::Write;
use types::io::hand_parser::parse_hand;
use types::{Auction, Board, Call, Hand, Position, Suit, Vulnerability};

pub fn get_hand_suits(hand: &Hand) -> Vec<String> {
    let mut hand = hand.clone();
    hand.sort();

    let mut suits = Vec::new();
    for suit in Suit::ALL.iter().rev() {
        let cards: String = hand
            .cards
            .iter()
            .filter(|c| c.suit == *suit)
            .map(|c| c.rank.to_char())
            .collect();
        suits.push(format!(
            "{}: {}",
            suit.to_char(),
            if cards.is_empty() { "-" } else { &cards }
        ));
    }
    suits
}

pub fn format_hands_table(hands: &HashMap<Position, Hand>) -> String {
    let empty = vec!["-".to_string(); 4];
    let suits = |pos: Position| hands.get(&pos).map(get_hand_suits).unwrap_or(empty.clone());
    let (n, e, s, w) = (
        suits(Position::North),
        suits(Position::East),
        suits(Position::South),
        suits(Position::West),
    );

    let indent = "        ";
    let mut out = String::new();
    let _ = writeln!(out, "{indent}North");
    for line in &n {
        let _ = writeln!(out, "{indent}{line}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<20} East", "West");
    for (west, east) in w.iter().zip(&e) {
        let _ = writeln!(out, "{west:<20} {east}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{indent}South");
    for line in &s {
        let _ = writeln!(out, "{indent}{line}");
    }
    out
}

/// A single-hand board from `["Hand", "ExpectedCall"?, "History"?, "Vulnerability"?]`.
/// North deals; the hand belongs to whoever is next to call.
pub fn parse_test_case(test_case_json: &str) -> Result<(Board, Vec<Call>, Option<String>)> {
    let parts: Vec<String> =
        serde_json::from_str(test_case_json).context("test case must be a JSON string array")?;
    let Some(hand_str) = parts.first() else {
        bail!("empty test case");
    };
    let expected = parts.get(1).cloned();
    let history = engine::parse_calls(parts.get(2).map(String::as_str).unwrap_or(""));
    let vulnerability = match parts.get(3).map(String::as_str).unwrap_or("None") {
        "N-S" | "NS" => Vulnerability::NS,
        "E-W" | "EW" => Vulnerability::EW,
        "Both" | "All" => Vulnerability::Both,
        _ => Vulnerability::None,
    };

    let dealer = Position::North;
    let mut auction = Auction::new(dealer);
    for call in &history {
        if !auction.is_legal_next(*call) {
            bail!("history call {call} is not legal after {:?}", auction.calls);
        }
        auction.add_call(*call);
    }
    let hand = parse_hand(hand_str);
    if hand.len() != 13 {
        bail!("hand {hand_str:?} holds {} cards", hand.len());
    }
    let hands = HashMap::from([(auction.current_player(), hand)]);
    Ok((Board::new(dealer, vulnerability, hands), history, expected))
}

pub fn format_row(idx: usize, pos: char, call: &str, rule: &str, desc: &str) -> String {
    format!("{:<3} | {:<3} | {:<5} | {:<22} | {}", idx, pos, call, rule, desc)
}

pub fn format_table_header() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<3} | {:<3} | {:<5} | {:<22} | Rationale",
        "Idx", "Pos", "Call", "Rule"
    );
    let _ = writeln!(
        out,
        "{:-<3}-+-{:-<3}-+-{:-<5}-+-{:-<22}-+---------------------------",
        "", "", "", ""
    );
    out
}

pub fn format_record_row(idx: usize, record: &TurnRecord) -> String {
    let rule = record
        .proposed
        .rule
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    format_row(
        idx,
        record.seat.to_char(),
        &record.final_call.render(),
        &rule,
        &record.rationale,
    )
}

pub fn format_belief(belief: &BeliefModel) -> String {
    let mut out = String::new();
    for seat in Position::ALL {
        let _ = write!(out, "  {}: {}", seat, belief.range(seat));
        let annotations = &belief.seat(seat).annotations;
        if !annotations.is_empty() {
            let _ = write!(out, " {annotations:?}");
        }
        let _ = writeln!(out, " (estimate {:.1})", belief.estimate(seat));
    }
    out
}

/// Every stage of one decision.
pub fn format_full_trace(idx: usize, record: &TurnRecord, belief: &BeliefModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nFull Trace for Call {idx}:");
    let _ = writeln!(out, "=======================");
    let _ = writeln!(out, "\nBelief:");
    out.push_str(&format_belief(belief));

    let proposed = &record.proposed;
    let _ = writeln!(
        out,
        "\nProposed: {} by {} (priority {})",
        proposed.call.notation(),
        proposed.rule.map(|id| id.to_string()).unwrap_or_else(|| "no rule".to_string()),
        proposed.priority
    );
    if !proposed.also_matched.is_empty() {
        let _ = writeln!(out, "Also matched: {:?}", proposed.also_matched);
    }
    let _ = writeln!(out, "Legality: {}", record.corrected);
    let verdict = if record.sanity.allow { "allowed" } else { "rejected" };
    let _ = writeln!(out, "Sanity: {verdict} ({})", record.sanity.reason);
    let _ = write!(out, "Review: {}", record.review.reason);
    if record.review.samples > 0 {
        let _ = write!(out, " over {} deals", record.review.samples);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Final: {}", record.final_call.notation());
    let _ = writeln!(out, "=======================\n");
    out
}

/// Print the calls already made, one row each, and append them to `auction`.
pub fn replay_history(auction: &mut Auction, history: &[Call], idx: &mut usize) -> String {
    let mut out = String::new();
    for call in history {
        let player = auction.current_player();
        *idx += 1;
        let _ = writeln!(
            out,
            "{}",
            format_row(*idx, player.to_char(), &call.render(), "", "(History)")
        );
        auction.add_call(*call);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_places_the_hand_at_the_next_seat() {
        let (board, history, expected) =
            parse_test_case(r#"["32.Q32.KJ432.Q32", "2D", "1N P", "EW"]"#).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(expected.as_deref(), Some("2D"));
        assert_eq!(board.vulnerability, Vulnerability::EW);
        assert!(board.get_hand(Position::South).is_some());
        assert_eq!(board.hands.len(), 1);
    }

    #[test]
    fn bad_test_cases_are_errors() {
        assert!(parse_test_case("[]").is_err());
        assert!(parse_test_case("not json").is_err());
        assert!(parse_test_case(r#"["AK.."]"#).is_err());
        assert!(parse_test_case(r#"["32.Q32.KJ432.Q32", "2D", "1S 1H"]"#).is_err());
    }

    #[test]
    fn hands_print_spades_first() {
        let suits = get_hand_suits(&parse_hand("32.Q32.KJ432.Q32"));
        assert_eq!(suits[0], "S: Q32");
        assert_eq!(suits[3], "C: 32");
    }
}

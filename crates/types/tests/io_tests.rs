use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use types::io::identifier;
use types::{Call, Hand, Position};

#[derive(Debug, Deserialize)]
struct TestVector {
    name: String,
    board_number: u32,
    dealer: String,
    vulnerability: String,
    #[serde(default)]
    hands: HashMap<String, String>,
    auction: Vec<String>,
    expected: HashMap<String, String>,
}

#[test]
fn test_io_roundtrip() {
    let yaml_content =
        fs::read_to_string("../../tests/board/formats.yaml").expect("Failed to read test vectors");
    let vectors: Vec<TestVector> =
        serde_yaml::from_str(&yaml_content).expect("Failed to parse test vectors");

    for vector in vectors {
        let Some(expected_identifier) = vector.expected.get("identifier") else {
            continue;
        };
        let (board, auction) = identifier::import_board(expected_identifier)
            .unwrap_or_else(|e| panic!("{}: failed to import identifier: {e}", vector.name));

        assert_eq!(
            board.dealer.to_char().to_string(),
            vector.dealer,
            "Dealer mismatch for {}",
            vector.name
        );
        assert_eq!(
            format!("{:?}", board.vulnerability),
            vector.vulnerability,
            "Vulnerability mismatch for {}",
            vector.name
        );

        for (seat, cards) in &vector.hands {
            let position = seat
                .chars()
                .next()
                .and_then(Position::from_char)
                .unwrap_or_else(|| panic!("{}: bad seat {seat}", vector.name));
            let mut expected = Hand::parse(cards);
            let mut actual = board.get_hand(position).unwrap().clone();
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected, "{}: hand mismatch for {seat}", vector.name);
        }

        let expected_calls: Vec<Call> = vector
            .auction
            .iter()
            .map(|c| c.parse().unwrap())
            .collect();
        let imported_calls = auction.as_ref().map(|a| a.calls.clone()).unwrap_or_default();
        assert_eq!(imported_calls, expected_calls, "Auction mismatch for {}", vector.name);

        let exported_identifier =
            identifier::export_board(&board, vector.board_number, auction.as_ref());
        assert_eq!(
            exported_identifier, *expected_identifier,
            "Identifier roundtrip failed for {}",
            vector.name
        );
    }
}

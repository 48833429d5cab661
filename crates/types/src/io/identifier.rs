use crate::auction::{Auction, AuctionError};
use crate::board::{Board, Position, Vulnerability};
use crate::card::Card;
use crate::hand::Hand;
use std::collections::HashMap;
use thiserror::Error;

/// Board identifiers look like `<board_number>-<deal_hex>[:<calls>]`, where
/// the 26 hex digits each place two consecutive cards (by card id) with a
/// seat index pair `high * 4 + low`, and calls are comma separated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier must look like <board>-<deal>[:<calls>]")]
    Malformed,
    #[error("bad board number {0:?}")]
    BoardNumber(String),
    #[error("deal must be 26 hex digits, got {0:?}")]
    Deal(String),
    #[error(transparent)]
    Auction(#[from] AuctionError),
}

pub fn import_board(identifier: &str) -> Result<(Board, Option<Auction>), IdentifierError> {
    let (board_number, rest) = identifier
        .trim()
        .split_once('-')
        .ok_or(IdentifierError::Malformed)?;
    let board_number: u32 = board_number
        .parse()
        .map_err(|_| IdentifierError::BoardNumber(board_number.to_string()))?;

    let (deal, calls) = match rest.split_once(':') {
        Some((deal, calls)) => (deal, Some(calls)),
        None => (rest, None),
    };

    let hands = import_hex_deal(deal).ok_or_else(|| IdentifierError::Deal(deal.to_string()))?;
    let dealer = Position::dealer_from_board_number(board_number);
    let board = Board::new(
        dealer,
        Vulnerability::from_board_number(board_number),
        hands,
    );

    let auction = calls
        .map(|calls| {
            let tokens: Vec<&str> = calls
                .split([',', ' '])
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();
            Auction::from_tokens(dealer, &tokens)
        })
        .transpose()?;

    Ok((board, auction))
}

pub fn import_hex_deal(deal: &str) -> Option<HashMap<Position, Hand>> {
    if deal.len() != 26 {
        return None;
    }

    let mut hands: HashMap<Position, Hand> = Position::ALL
        .iter()
        .map(|&pos| (pos, Hand::default()))
        .collect();

    for (i, c) in deal.chars().enumerate() {
        let digit = c.to_digit(16)? as usize;
        let seats = [digit / 4, digit % 4];
        for (offset, seat) in seats.into_iter().enumerate() {
            let card = Card::from_id((i * 2 + offset) as u8)?;
            hands.entry(Position::ALL[seat]).or_default().cards.push(card);
        }
    }

    Some(hands)
}

pub fn export_board(board: &Board, board_number: u32, auction: Option<&Auction>) -> String {
    let mut identifier = format!("{}-{}", board_number, export_hex_deal(&board.hands));
    if let Some(auction) = auction.filter(|a| !a.is_empty()) {
        let calls: Vec<String> = auction.calls.iter().map(|c| c.render()).collect();
        identifier.push(':');
        identifier.push_str(&calls.join(","));
    }
    identifier
}

pub fn export_hex_deal(hands: &HashMap<Position, Hand>) -> String {
    let mut seat_for_card = [0usize; 52];
    for (position, hand) in hands {
        for card in &hand.cards {
            seat_for_card[card.id() as usize] = position.idx();
        }
    }

    seat_for_card
        .chunks(2)
        .filter_map(|pair| std::char::from_digit((pair[0] * 4 + pair[1]) as u32, 16))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::Call;
    use crate::strain::Strain;

    #[test]
    fn test_hex_deal_roundtrip() {
        let mut hands: HashMap<Position, Hand> = HashMap::new();
        for card in Card::deck() {
            let pos = Position::ALL[card.id() as usize % 4];
            hands.entry(pos).or_default().cards.push(card);
        }

        let exported = export_hex_deal(&hands);
        assert_eq!(exported.len(), 26);
        let imported = import_hex_deal(&exported).unwrap();
        for pos in Position::ALL {
            assert_eq!(imported[&pos].len(), 13);
            assert_eq!(imported[&pos], hands[&pos]);
        }
    }

    #[test]
    fn test_import_board_identifier() {
        // Every digit 0 puts both cards with North.
        let identifier = "1-00000000000000000000000000:1S,X,XX,P";
        let (board, auction) = import_board(identifier).unwrap();

        assert_eq!(board.dealer, Position::North);
        assert_eq!(board.vulnerability, Vulnerability::None);
        assert_eq!(board.get_hand(Position::North).unwrap().len(), 52);

        let auction = auction.unwrap();
        assert_eq!(
            auction.calls,
            vec![
                Call::Bid {
                    level: 1,
                    strain: Strain::Spades
                },
                Call::Double,
                Call::Redouble,
                Call::Pass,
            ]
        );
    }

    #[test]
    fn test_import_errors() {
        assert!(matches!(
            import_board("nonsense"),
            Err(IdentifierError::Malformed)
        ));
        assert!(matches!(
            import_board("x-00000000000000000000000000"),
            Err(IdentifierError::BoardNumber(_))
        ));
        assert!(matches!(
            import_board("1-0000"),
            Err(IdentifierError::Deal(_))
        ));
        assert!(matches!(
            import_board("1-00000000000000000000000000:1S,1H"),
            Err(IdentifierError::Auction(AuctionError::IllegalCall { index: 1, .. }))
        ));
    }

    #[test]
    fn test_export_board() {
        let (board, auction) = import_board("3-0123456789abcdef0123456789:P,1N").unwrap();
        assert_eq!(board.dealer, Position::South);
        let exported = export_board(&board, 3, auction.as_ref());
        assert_eq!(exported, "3-0123456789abcdef0123456789:P,1N");
    }
}

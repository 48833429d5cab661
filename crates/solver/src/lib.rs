//! Double-dummy trick counts from DDS, exposed as a [`TrickOracle`].

use dds_bridge::contract::Strain as DdsStrain;
use dds_bridge::deal::{Deal as DdsDeal, Seat, SmallSet, Suit as DdsSuit};
use dds_bridge::solver::{self, StrainFlags};
use engine::conflict::{Deal, OracleError, TrickOracle};
use serde::Serialize;
use types::{Position, Strain, Suit};

/// Tricks each seat takes as declarer in each strain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickTable {
    /// Indexed by `Position::idx()`, then `Strain::idx()`.
    tricks: [[u8; 5]; 4],
}

impl TrickTable {
    pub fn tricks(&self, declarer: Position, strain: Strain) -> u8 {
        self.tricks[declarer.idx()][strain.idx()]
    }
}

fn seat(position: Position) -> Seat {
    match position {
        Position::North => Seat::North,
        Position::East => Seat::East,
        Position::South => Seat::South,
        Position::West => Seat::West,
    }
}

fn dds_suit(suit: Suit) -> DdsSuit {
    match suit {
        Suit::Clubs => DdsSuit::Clubs,
        Suit::Diamonds => DdsSuit::Diamonds,
        Suit::Hearts => DdsSuit::Hearts,
        Suit::Spades => DdsSuit::Spades,
    }
}

fn dds_strain(strain: Strain) -> DdsStrain {
    match strain {
        Strain::Clubs => DdsStrain::Clubs,
        Strain::Diamonds => DdsStrain::Diamonds,
        Strain::Hearts => DdsStrain::Hearts,
        Strain::Spades => DdsStrain::Spades,
        Strain::Notrump => DdsStrain::Notrump,
    }
}

fn to_dds(deal: &Deal) -> DdsDeal {
    let mut dds = DdsDeal::default();
    for position in Position::ALL {
        for card in &deal.hand(position).cards {
            dds[seat(position)][dds_suit(card.suit)].insert(card.rank as u8);
        }
    }
    dds
}

/// Solve every strain for every declarer.
pub fn solve(deal: &Deal) -> Result<TrickTable, OracleError> {
    deal.validate()?;
    let results = solver::solve_deals(&[to_dds(deal)], StrainFlags::all())
        .map_err(|err| OracleError::Failed(format!("{err:?}")))?;
    let table = results
        .first()
        .ok_or_else(|| OracleError::Failed("solver returned no table".to_string()))?;

    let mut tricks = [[0u8; 5]; 4];
    for position in Position::ALL {
        for strain in Strain::ALL {
            tricks[position.idx()][strain.idx()] = table[dds_strain(strain)].get(seat(position));
        }
    }
    Ok(TrickTable { tricks })
}

/// Exact double-dummy play of each sampled deal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleDummyOracle;

impl TrickOracle for DoubleDummyOracle {
    fn tricks(&self, deal: &Deal, declarer: Position, strain: Strain) -> Result<u8, OracleError> {
        let table = solve(deal)?;
        let tricks = table.tricks(declarer, strain);
        tracing::trace!(%declarer, ?strain, tricks, "double dummy");
        Ok(tricks)
    }
}

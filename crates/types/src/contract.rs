use crate::board::Position;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoubleStatus {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub double_status: DoubleStatus,
    pub declarer: Position,
}

impl Contract {
    /// Tricks declarer needs to make the contract.
    pub fn tricks_required(&self) -> u8 {
        self.level + 6
    }

    pub fn is_game(&self) -> bool {
        self.level >= self.strain.game_level()
    }

    pub fn is_slam(&self) -> bool {
        self.level >= 6
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doubling = match self.double_status {
            DoubleStatus::Undoubled => "",
            DoubleStatus::Doubled => "X",
            DoubleStatus::Redoubled => "XX",
        };
        write!(
            f,
            "{}{}{} by {}",
            self.level,
            self.strain.notation(),
            doubling,
            self.declarer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(level: u8, strain: Strain) -> Contract {
        Contract {
            level,
            strain,
            double_status: DoubleStatus::Undoubled,
            declarer: Position::South,
        }
    }

    #[test]
    fn test_game_and_slam() {
        assert!(contract(3, Strain::Notrump).is_game());
        assert!(!contract(4, Strain::Diamonds).is_game());
        assert!(contract(6, Strain::Clubs).is_slam());
        assert_eq!(contract(4, Strain::Hearts).tricks_required(), 10);
    }

    #[test]
    fn test_display() {
        let mut c = contract(4, Strain::Spades);
        c.double_status = DoubleStatus::Doubled;
        assert_eq!(c.to_string(), "4♠X by S");
    }
}

use crate::hand::Hand;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Position {
    #[default]
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NS,
    EW,
}

/// How one seat relates to another at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Me,
    Partner,
    Opponent,
}

impl Partnership {
    pub fn contains(self, pos: Position) -> bool {
        pos.partnership() == self
    }

    pub fn idx(self) -> usize {
        match self {
            Partnership::NS => 0,
            Partnership::EW => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Partnership::NS => Partnership::EW,
            Partnership::EW => Partnership::NS,
        }
    }
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn partnership(self) -> Partnership {
        match self {
            Position::North | Position::South => Partnership::NS,
            Position::East | Position::West => Partnership::EW,
        }
    }

    /// Next seat clockwise.
    pub fn next(self) -> Self {
        Position::ALL[(self.idx() + 1) % 4]
    }

    pub fn partner(self) -> Self {
        Position::ALL[(self.idx() + 2) % 4]
    }

    /// Left-hand opponent (next in clockwise bidding order).
    pub fn lho(self) -> Self {
        self.next()
    }

    /// Right-hand opponent (previous in clockwise bidding order).
    pub fn rho(self) -> Self {
        Position::ALL[(self.idx() + 3) % 4]
    }

    /// How `other` relates to this seat.
    pub fn relation_to(self, other: Position) -> Relation {
        if other == self {
            Relation::Me
        } else if other == self.partner() {
            Relation::Partner
        } else {
            Relation::Opponent
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Position::North => 'N',
            Position::East => 'E',
            Position::South => 'S',
            Position::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Position::North),
            'E' => Some(Position::East),
            'S' => Some(Position::South),
            'W' => Some(Position::West),
            _ => None,
        }
    }

    pub fn dealer_from_board_number(board_number: u32) -> Self {
        Position::ALL[((board_number + 3) % 4) as usize]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    Both,
}

impl Vulnerability {
    pub fn is_vulnerable(self, pos: Position) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::NS => pos.partnership() == Partnership::NS,
            Vulnerability::EW => pos.partnership() == Partnership::EW,
            Vulnerability::Both => true,
        }
    }

    /// Standard duplicate rotation over 16 boards.
    pub fn from_board_number(board_number: u32) -> Self {
        match board_number % 16 {
            1 | 8 | 11 | 14 => Vulnerability::None,
            2 | 5 | 12 | 15 => Vulnerability::NS,
            3 | 6 | 9 | 0 => Vulnerability::EW,
            _ => Vulnerability::Both,
        }
    }
}

/// A dealt board: who deals, who is vulnerable, and the four hands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub dealer: Position,
    pub vulnerability: Vulnerability,
    pub hands: HashMap<Position, Hand>,
}

impl Board {
    pub fn new(
        dealer: Position,
        vulnerability: Vulnerability,
        hands: HashMap<Position, Hand>,
    ) -> Self {
        Self {
            dealer,
            vulnerability,
            hands,
        }
    }

    pub fn get_hand(&self, pos: Position) -> Option<&Hand> {
        self.hands.get(&pos)
    }
}

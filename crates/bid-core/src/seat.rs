use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four seats at the table.
///
/// North/South are "our side"; East/West are the opponents whose calls are
/// shown in parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Seat {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Ours,
    Theirs,
}

impl Seat {
    /// Seat order of an auction table where South deals.
    pub const TABLE_ORDER: [Seat; 4] = [Seat::South, Seat::West, Seat::North, Seat::East];

    pub fn next(self) -> Self {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Seat::North | Seat::South => Side::Ours,
            Seat::East | Seat::West => Side::Theirs,
        }
    }

    pub fn is_opponent(self) -> bool {
        self.side() == Side::Theirs
    }

    pub fn to_char(self) -> char {
        match self {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

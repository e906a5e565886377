use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Coordinate, ParseDirectionError};

/// The edge of the board that a piece is pushed in from.
///
/// A piece pushed from the north enters at the top edge and travels downwards,
/// and so on for the other edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

/// Which kind of line a move addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// East and west moves push along a row.
    Row,
    /// North and south moves push along a column.
    Column,
}

impl Direction {
    /// All directions, in order of their codes.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The numeric code of this direction, `0..=3`.
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// The direction rotated by 90° clockwise: north → east → south → west → north.
    pub fn rotate(self) -> Self {
        Self::ALL[(self as usize + 1) % 4]
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Column,
            Direction::East | Direction::West => Axis::Row,
        }
    }

    /// The letter used for this direction in move notation.
    pub fn initial(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// An arrow pointing where the pushed piece travels.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::North => "↓",
            Direction::East => "⟵",
            Direction::South => "↑",
            Direction::West => "⟶",
        }
    }

    /// Where a piece pushed into line `offset` enters a board of the given
    /// size, and the step it travels with.
    pub(crate) fn entry_and_step(
        self,
        offset: i32,
        (width, height): (i32, i32),
    ) -> (Coordinate, (i32, i32)) {
        match self {
            Direction::North => ((offset, 0), (0, 1)),
            Direction::East => ((width - 1, offset), (-1, 0)),
            Direction::South => ((offset, height - 1), (0, -1)),
            Direction::West => ((0, offset), (1, 0)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts the initial or the full name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|dir| {
                lowercase == dir.to_string().to_lowercase()
                    || lowercase == dir.initial().to_lowercase().to_string()
            })
            .ok_or_else(|| ParseDirectionError(String::from(s)))
    }
}

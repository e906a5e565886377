use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Direction, IllegalMove, PlayerId};

/// Pushing a piece into the line `offset` from the given edge.
///
/// `offset` counts rows (for east/west) or columns (for north/south) from the
/// top left, starting at 0. In notation, lines are counted from 1, so that
/// `N1` is a push from the north into the leftmost column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub offset: i32,
    pub direction: Direction,
}

impl Move {
    pub fn new(offset: i32, direction: Direction) -> Self {
        Self { offset, direction }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.direction.initial(), i64::from(self.offset) + 1)
    }
}

/// Parses the 1-based line number of a move.
pub(crate) fn parse_line_number(s: &str, input: &str) -> Result<i32, IllegalMove> {
    s.trim()
        .parse::<i32>()
        .ok()
        .and_then(|line| line.checked_sub(1))
        .ok_or_else(|| IllegalMove::InvalidArgumentType {
            input: String::from(input),
        })
}

impl FromStr for Move {
    type Err = IllegalMove;

    /// Parses notation like `N1` or `w12`.
    ///
    /// Only the syntax is checked. Whether the line exists is up to
    /// [`Game::check_move()`](crate::Game::check_move).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || IllegalMove::InvalidArgumentType {
            input: String::from(s),
        };
        let mut chars = trimmed.chars();
        let initial = chars.next().ok_or_else(invalid)?;
        let direction: Direction = initial.to_string().parse().map_err(|_| invalid())?;
        let offset = parse_line_number(chars.as_str(), s)?;
        Ok(Move { offset, direction })
    }
}

/// One entry in the history of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Starts at 1 for the first move of the game.
    pub turn: usize,
    pub player: PlayerId,
    #[serde(rename = "move")]
    pub mv: Move,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. P{} {}", self.turn, self.player + 1, self.mv)
    }
}

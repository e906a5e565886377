use serde::{Deserialize, Serialize};

use crate::{Direction, PlayerId};

/// How many turns in a row each player gets.
pub const TURNS_PER_PLAYER: usize = 2;

/// The endless sequence of players whose turn it is.
///
/// Every player gets [`TURNS_PER_PLAYER`] turns in a row, then the next player
/// follows, wrapping around after the last one. The sequencer knows nothing
/// about pieces running out, that is the job of the [`Game`](crate::Game).
#[derive(Clone, Debug)]
pub struct TurnSequencer {
    players: usize,
    player: PlayerId,
    /// Turns that `player` still gets in the current stint.
    turns_left: usize,
}

impl TurnSequencer {
    /// Panics if `players` is zero.
    pub fn new(players: usize) -> Self {
        assert!(players > 0, "at least one player is needed");
        Self {
            players,
            player: 0,
            turns_left: TURNS_PER_PLAYER,
        }
    }
}

impl Iterator for TurnSequencer {
    type Item = PlayerId;

    fn next(&mut self) -> Option<PlayerId> {
        if self.turns_left == 0 {
            self.player = (self.player + 1) % self.players;
            self.turns_left = TURNS_PER_PLAYER;
        }
        self.turns_left -= 1;
        Some(self.player)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// In which direction the current player may push.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    /// Any of the four directions.
    Free,
    /// Only this direction, the previous turn's direction rotated by 90°.
    Forced(Direction),
}

impl TurnDirection {
    pub fn forced(self) -> Option<Direction> {
        match self {
            TurnDirection::Free => None,
            TurnDirection::Forced(dir) => Some(dir),
        }
    }

    /// Whether `direction` may be played.
    pub fn allows(self, direction: Direction) -> bool {
        self.forced().map_or(true, |forced| forced == direction)
    }
}

/// Whose turn it is, if anyone's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    Active {
        player: PlayerId,
        direction: TurnDirection,
    },
    Finished,
}

/// Summarizes the outcome of playing a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The game goes on with this turn.
    Continue {
        player: PlayerId,
        direction: TurnDirection,
    },
    GameEnded,
}

impl From<TurnState> for TurnOutcome {
    fn from(state: TurnState) -> Self {
        match state {
            TurnState::Active { player, direction } => TurnOutcome::Continue { player, direction },
            TurnState::Finished => TurnOutcome::GameEnded,
        }
    }
}

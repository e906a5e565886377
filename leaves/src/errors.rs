use crate::Direction;

/// The error type for [`Game::check_move()`](crate::Game::check_move) and
/// [`Game::apply_move()`](crate::Game::apply_move).
///
/// None of these leave the game in a different state than before.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    /// The game is already over.
    GameOver,
    /// It's the second turn of a player, and the direction given is not the
    /// one forced by the previous turn.
    DirectionMismatch { expected: Direction, got: i32 },
    /// The direction code is not one of the four directions.
    InvalidDirection { code: i32 },
    /// There is no row/column with this index.
    OffsetOutOfRange {
        offset: i32,
        len: i32,
        direction: Direction,
    },
    /// The input could not be understood as a move at all.
    InvalidArgumentType { input: String },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::GameOver => write!(f, "The game is over, no moves allowed"),
            IllegalMove::DirectionMismatch { expected, got } => match Direction::from_code(*got) {
                Some(got) => write!(f, "Direction {} does not match the forced direction {}", got, expected),
                None => write!(f, "Direction code {} does not match the forced direction {}", got, expected),
            },
            IllegalMove::InvalidDirection { code } => {
                write!(f, "{} is not a valid direction code, expected 0 to 3", code)
            }
            IllegalMove::OffsetOutOfRange {
                offset,
                len,
                direction,
            } => {
                let line = match direction.axis() {
                    crate::Axis::Row => "row",
                    crate::Axis::Column => "column",
                };
                write!(
                    f,
                    "There is no {} {} to push into from the {}, expected 1 to {}",
                    line,
                    offset + 1,
                    direction,
                    len
                )
            }
            IllegalMove::InvalidArgumentType { input } => {
                write!(f, "'{}' is not a move, expected e.g. 'N1' or 'W4'", input)
            }
        }
    }
}

/// The error type for [`Game::new()`](crate::Game::new).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NoLogs,
    NoPlayers,
    NoPieces,
    /// More logs than the board has coordinates for.
    TooManyLogs(usize),
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoLogs => write!(f, "The initial row needs at least one log"),
            ConfigError::NoPlayers => write!(f, "A game needs at least one player"),
            ConfigError::NoPieces => write!(f, "Every player needs at least one piece"),
            ConfigError::TooManyLogs(len) => write!(f, "A row of {} logs is too long", len),
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Direction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl std::error::Error for ParseDirectionError {}

impl std::fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a direction, expected one of N, E, S, W", self.0)
    }
}

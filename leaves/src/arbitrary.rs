use crate::{Axis, Direction, Game, GameConfig, Move, PlayerId, TurnDirection};

/// A small game together with enough move seeds to play it to the end.
#[derive(Clone, Debug)]
pub struct Playthrough {
    pub config: GameConfig,
    /// One `(direction, line)` seed per move, see [`Playthrough::legal_move()`].
    pub seeds: Vec<(u8, u8)>,
}

impl quickcheck::Arbitrary for Playthrough {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let config = GameConfig {
            log_row_length: 1 + usize::arbitrary(g) % 6,
            players: 1 + usize::arbitrary(g) % 4,
            pieces_per_player: 1 + usize::arbitrary(g) % 6,
        };
        let num_moves = config.players * config.pieces_per_player;
        let seeds = (0..num_moves)
            .map(|_| (u8::arbitrary(g), u8::arbitrary(g)))
            .collect();
        Playthrough { config, seeds }
    }
}

impl Playthrough {
    /// Maps a seed onto a move that is legal in the current turn.
    pub fn legal_move(game: &Game, (dir_seed, line_seed): (u8, u8)) -> Move {
        let direction = match game.current_direction() {
            Some(TurnDirection::Forced(direction)) => direction,
            _ => Direction::ALL[dir_seed as usize % 4],
        };
        let (width, height) = game.board_size();
        let len = match direction.axis() {
            Axis::Row => height,
            Axis::Column => width,
        };
        Move::new(i32::from(line_seed) % len, direction)
    }

    /// Plays the game, calling `check` on the fresh game and after every move
    /// with the turn that move was made in. Stops at the first `false`.
    pub fn replay(
        &self,
        mut check: impl FnMut(&Game, Option<(PlayerId, TurnDirection)>) -> bool,
    ) -> bool {
        let mut game = Game::new(self.config).unwrap();
        if !check(&game, None) {
            return false;
        }
        for &seed in &self.seeds {
            let Some(turn) = game.current_turn() else {
                break;
            };
            let mv = Self::legal_move(&game, seed);
            game.play(mv).unwrap();
            if !check(&game, Some(turn)) {
                return false;
            }
        }
        true
    }
}

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::notation::parse_line_number;
use crate::{
    Axis, Board, ConfigError, Direction, IllegalMove, Move, MoveRecord, Piece, PlayerId,
    TurnDirection, TurnOutcome, TurnSequencer, TurnState,
};

/// The parameters a game is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of the initial column of logs.
    pub log_row_length: usize,
    pub players: usize,
    pub pieces_per_player: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            log_row_length: 5,
            players: 2,
            pieces_per_player: 10,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_row_length == 0 {
            return Err(ConfigError::NoLogs);
        }
        if self.players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.pieces_per_player == 0 {
            return Err(ConfigError::NoPieces);
        }
        if i32::try_from(self.log_row_length).is_err() {
            return Err(ConfigError::TooManyLogs(self.log_row_length));
        }
        Ok(())
    }
}

/// The rules engine for one game of Leaves.
///
/// Players take turns pushing their pieces into the board from one of its
/// four edges. After a single opening move, each player gets two turns in a
/// row, where the second one must push from the edge rotated 90° clockwise
/// from the first. Once all
/// pieces are placed, only pieces next to a log count.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    /// Pieces not placed yet, indexed by player.
    remaining_pieces: Vec<usize>,
    sequencer: TurnSequencer,
    turn: TurnState,
    history: Vec<MoveRecord>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::initial(config))
    }

    fn initial(config: GameConfig) -> Self {
        let mut sequencer = TurnSequencer::new(config.players);
        // The first id only completes the opening player's stint, so the
        // opening move is a single one and play goes on as A BB AA BB.
        sequencer.next();
        let player = sequencer.next().expect("turn sequence is endless");
        Self {
            board: Board::log_row(config.log_row_length),
            remaining_pieces: vec![config.pieces_per_player; config.players],
            sequencer,
            turn: TurnState::Active {
                player,
                direction: TurnDirection::Free,
            },
            history: Vec::new(),
            config,
        }
    }

    /// Starts over with the same configuration.
    pub fn reset(&mut self) {
        debug!("Resetting game");
        *self = Self::initial(self.config);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn players(&self) -> usize {
        self.config.players
    }

    pub fn pieces_per_player(&self) -> usize {
        self.config.pieces_per_player
    }

    pub fn log_row_length(&self) -> usize {
        self.config.log_row_length
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_over(&self) -> bool {
        self.turn == TurnState::Finished
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    /// The current player and their direction, or `None` if the game is over.
    pub fn current_turn(&self) -> Option<(PlayerId, TurnDirection)> {
        match self.turn {
            TurnState::Active { player, direction } => Some((player, direction)),
            TurnState::Finished => None,
        }
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.current_turn().map(|(player, _)| player)
    }

    pub fn current_direction(&self) -> Option<TurnDirection> {
        self.current_turn().map(|(_, direction)| direction)
    }

    /// How many moves have been made so far.
    pub fn current_turn_number(&self) -> usize {
        self.history.len()
    }

    /// Pieces each player has yet to place.
    pub fn remaining_pieces(&self) -> &[usize] {
        &self.remaining_pieces
    }

    /// The moves made so far, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// `(width, height)` of the board.
    pub fn board_size(&self) -> (i32, i32) {
        self.board.size()
    }

    /// Checks whether the current player may push into line `offset` from `direction`.
    pub fn check_move(&self, offset: i32, direction: Direction) -> Result<(), IllegalMove> {
        self.check_move_code(offset, direction.code()).map(|_| ())
    }

    /// Like [`Self::check_move()`], but with a numeric direction code as in
    /// [`Direction::code()`]. Returns the decoded direction.
    pub fn check_move_code(&self, offset: i32, code: i32) -> Result<Direction, IllegalMove> {
        let (_, turn_direction) = self.current_turn().ok_or(IllegalMove::GameOver)?;
        if let TurnDirection::Forced(expected) = turn_direction {
            if code != expected.code() {
                return Err(IllegalMove::DirectionMismatch {
                    expected,
                    got: code,
                });
            }
        }
        let direction = Direction::from_code(code).ok_or(IllegalMove::InvalidDirection { code })?;
        let (width, height) = self.board.size();
        let len = match direction.axis() {
            Axis::Row => height,
            Axis::Column => width,
        };
        if !(0..len).contains(&offset) {
            return Err(IllegalMove::OffsetOutOfRange {
                offset,
                len,
                direction,
            });
        }
        Ok(direction)
    }

    /// Parses user input for the current turn.
    ///
    /// Accepts notation such as `N1`. When the direction is forced, a bare
    /// line number such as `3` is accepted too. The result still needs to go
    /// through [`Self::check_move()`].
    pub fn parse_move(&self, input: &str) -> Result<Move, IllegalMove> {
        match self.current_direction() {
            Some(TurnDirection::Forced(direction))
                if input.trim().starts_with(|c: char| c.is_ascii_digit()) =>
            {
                Ok(Move::new(parse_line_number(input, input)?, direction))
            }
            _ => input.parse(),
        }
    }

    /// Pushes a piece of the current player into the board.
    ///
    /// Returns an error and leaves the game untouched if the move is illegal.
    pub fn apply_move(
        &mut self,
        offset: i32,
        direction: Direction,
    ) -> Result<TurnOutcome, IllegalMove> {
        self.check_move(offset, direction)?;
        let player = self.current_player().ok_or(IllegalMove::GameOver)?;

        let (entry, step) = direction.entry_and_step(offset, self.board.size());
        self.board.push(entry, step, Piece::Player(player));
        self.board.renormalize();

        self.remaining_pieces[player] -= 1;
        let mv = Move { offset, direction };
        self.history.push(MoveRecord {
            turn: self.history.len() + 1,
            player,
            mv,
        });
        debug!(
            turn = self.history.len(),
            player,
            %mv,
            size = ?self.board.size(),
            "Applied move"
        );

        self.turn = self.next_turn(player, direction);
        if self.is_over() {
            debug!(turns = self.history.len(), "Game ended");
        }
        Ok(self.turn.into())
    }

    /// Applies a [`Move`], see [`Self::apply_move()`].
    pub fn play(&mut self, mv: Move) -> Result<TurnOutcome, IllegalMove> {
        self.apply_move(mv.offset, mv.direction)
    }

    fn next_turn(&mut self, mover: PlayerId, direction: Direction) -> TurnState {
        if self.remaining_pieces.iter().all(|&n| n == 0) {
            return TurnState::Finished;
        }
        // Players without pieces are skipped. Terminates since someone has pieces left.
        let mut skipped = false;
        let player = loop {
            let player = self.sequencer.next().expect("turn sequence is endless");
            if self.remaining_pieces[player] > 0 {
                break player;
            }
            skipped = true;
        };
        let direction = if player == mover && !skipped {
            TurnDirection::Forced(direction.rotate())
        } else {
            TurnDirection::Free
        };
        TurnState::Active { player, direction }
    }

    /// Points per player: the number of their pieces next to a log.
    ///
    /// Every player is listed, including those without points.
    pub fn scores(&self) -> BTreeMap<PlayerId, usize> {
        let mut scores: BTreeMap<PlayerId, usize> =
            (0..self.config.players).map(|p| (p, 0)).collect();
        for (piece, count) in self.board.pruned().counts() {
            if let Piece::Player(player) = piece {
                *scores.entry(player).or_insert(0) += count;
            }
        }
        scores
    }

    /// The players with the highest score. More than one means a draw.
    ///
    /// Empty while the game is not over.
    pub fn compute_winners(&self) -> BTreeSet<PlayerId> {
        if !self.is_over() {
            return BTreeSet::new();
        }
        let scores = self.scores();
        let best_score = scores.values().copied().max().unwrap_or(0);
        scores
            .into_iter()
            .filter(|&(_, score)| score == best_score)
            .map(|(player, _)| player)
            .collect()
    }

    /// Renders the board (or only its scoring pieces) with `tile` drawing each cell.
    pub fn render_board<T: std::fmt::Display>(
        &self,
        pruned: bool,
        tile: impl FnMut(Option<Piece>) -> T,
    ) -> String {
        let board = if pruned {
            Cow::Owned(self.board.pruned())
        } else {
            Cow::Borrowed(&self.board)
        };
        board.render(tile)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::Playthrough;

    fn tile(piece: Option<Piece>) -> char {
        match piece {
            None => '.',
            Some(Piece::Log) => '#',
            Some(Piece::Player(p)) => char::from(b'a' + p as u8),
        }
    }

    fn game(log_row_length: usize, players: usize, pieces_per_player: usize) -> Game {
        Game::new(GameConfig {
            log_row_length,
            players,
            pieces_per_player,
        })
        .unwrap()
    }

    quickcheck! {
        fn turn_count_invariant(input: Playthrough) -> bool {
            let total = input.config.players * input.config.pieces_per_player;
            input.replay(|game, _| {
                game.remaining_pieces().iter().sum::<usize>() + game.current_turn_number() == total
            })
        }

        fn board_grows_by_at_most_one(input: Playthrough) -> bool {
            let mut size = Game::new(input.config).unwrap().board_size();
            input.replay(|game, _| {
                let (w0, h0) = size;
                let (w1, h1) = game.board_size();
                size = (w1, h1);
                (w1 - w0 == 0 || w1 - w0 == 1) && (h1 - h0 == 0 || h1 - h0 == 1)
            })
        }

        fn coordinates_stay_non_negative(input: Playthrough) -> bool {
            input.replay(|game, _| game.board().iter().all(|((x, y), _)| x >= 0 && y >= 0))
        }

        fn every_move_adds_one_piece(input: Playthrough) -> bool {
            let logs = input.config.log_row_length;
            input.replay(|game, _| game.board().len() == logs + game.current_turn_number())
        }

        fn logs_are_never_removed(input: Playthrough) -> bool {
            let logs = input.config.log_row_length;
            input.replay(|game, _| game.board().counts().get(&Piece::Log) == Some(&logs))
        }

        fn ends_after_all_pieces(input: Playthrough) -> bool {
            let total = input.config.players * input.config.pieces_per_player;
            input.replay(|game, _| game.is_over() == (game.current_turn_number() == total))
        }

        fn second_turn_is_rotated(input: Playthrough) -> bool {
            input.replay(|game, prev| {
                let (Some(prev), Some(record)) = (prev, game.history().last()) else {
                    return true;
                };
                match game.current_turn() {
                    // A forced direction follows the same player's move just made
                    Some((player, TurnDirection::Forced(dir))) => {
                        player == record.player && dir == record.mv.direction.rotate()
                    }
                    // Nobody gets a third turn in a row
                    Some((player, TurnDirection::Free)) => {
                        !(player == record.player && prev.1.forced().is_some())
                            || game.players() == 1
                    }
                    None => true,
                }
            })
        }

        fn rejected_moves_change_nothing(input: Playthrough, offset: i32, code: i32) -> bool {
            input.replay(|game, _| {
                let mut copy = game.clone();
                match Direction::from_code(code) {
                    Some(direction) if game.check_move(offset, direction).is_err() => {
                        copy.apply_move(offset, direction).is_err()
                            && copy.board() == game.board()
                            && copy.turn_state() == game.turn_state()
                            && copy.remaining_pieces() == game.remaining_pieces()
                    }
                    _ => true,
                }
            })
        }
    }

    #[test]
    fn initial_state() {
        let game = game(3, 2, 1);
        assert_eq!(game.render_board(false, tile), "#\n#\n#");
        assert_eq!(game.board_size(), (1, 3));
        assert_eq!(game.current_turn(), Some((0, TurnDirection::Free)));
        assert_eq!(game.current_turn_number(), 0);
        assert_eq!(game.remaining_pieces(), &[1, 1]);
        assert!(!game.is_over());
        assert!(game.compute_winners().is_empty());
    }

    #[test]
    fn push_from_north_into_log_row() {
        let mut game = game(3, 2, 1);
        let outcome = game.apply_move(0, Direction::North).unwrap();
        // The piece takes the top cell and every log moves down by one
        assert_eq!(game.render_board(false, tile), "a\n#\n#\n#");
        assert_eq!(game.board_size(), (1, 4));
        assert_eq!(game.remaining_pieces(), &[0, 1]);
        // The opening stint is a single move
        assert_eq!(
            outcome,
            TurnOutcome::Continue {
                player: 1,
                direction: TurnDirection::Free
            }
        );

        game.apply_move(0, Direction::West).unwrap();
        assert_eq!(game.render_board(false, tile), "ba\n#.\n#.\n#.");
        assert!(game.is_over());
        assert_eq!(game.remaining_pieces(), &[0, 0]);
        assert_eq!(game.render_board(true, tile), "b\n#\n#\n#");
        assert_eq!(game.scores(), BTreeMap::from([(0, 0), (1, 1)]));
        assert_eq!(game.compute_winners(), BTreeSet::from([1]));
    }

    #[test]
    fn two_turns_per_player() {
        let mut game = game(5, 2, 2);
        assert_eq!(game.current_turn(), Some((0, TurnDirection::Free)));
        game.apply_move(2, Direction::West).unwrap();
        assert_eq!(game.current_turn(), Some((1, TurnDirection::Free)));
        game.apply_move(4, Direction::East).unwrap();
        assert_eq!(
            game.current_turn(),
            Some((1, TurnDirection::Forced(Direction::South)))
        );
        game.apply_move(0, Direction::South).unwrap();
        assert_eq!(game.current_turn_number(), 3);
        assert_eq!(game.current_turn(), Some((0, TurnDirection::Free)));
        assert_eq!(game.apply_move(0, Direction::North), Ok(TurnOutcome::GameEnded));
        assert!(game.is_over());
        assert_eq!(game.remaining_pieces(), &[0, 0]);
        assert_eq!(game.current_turn(), None);
    }

    #[test]
    fn third_stint_returns_to_first_player() {
        let mut game = game(2, 2, 3);
        let mut players = Vec::new();
        while let Some((player, direction)) = game.current_turn() {
            players.push(player);
            let direction = direction.forced().unwrap_or(Direction::West);
            game.apply_move(0, direction).unwrap();
        }
        assert_eq!(players, vec![0, 1, 1, 0, 0, 1]);
    }

    #[test]
    fn validation_order() {
        let mut game = game(3, 2, 2);
        assert_eq!(
            game.check_move_code(0, 4),
            Err(IllegalMove::InvalidDirection { code: 4 })
        );
        assert_eq!(
            game.check_move(1, Direction::North),
            Err(IllegalMove::OffsetOutOfRange {
                offset: 1,
                len: 1,
                direction: Direction::North
            })
        );
        assert_eq!(
            game.check_move(3, Direction::East),
            Err(IllegalMove::OffsetOutOfRange {
                offset: 3,
                len: 3,
                direction: Direction::East
            })
        );
        assert_eq!(
            game.check_move(-1, Direction::East),
            Err(IllegalMove::OffsetOutOfRange {
                offset: -1,
                len: 3,
                direction: Direction::East
            })
        );
        assert_eq!(game.check_move(2, Direction::East), Ok(()));

        game.apply_move(0, Direction::East).unwrap();
        game.apply_move(0, Direction::East).unwrap();
        // Forced turn: a mismatch wins over a bad offset or code
        assert_eq!(
            game.check_move(99, Direction::North),
            Err(IllegalMove::DirectionMismatch {
                expected: Direction::South,
                got: Direction::North.code()
            })
        );
        assert_eq!(
            game.check_move_code(0, 7),
            Err(IllegalMove::DirectionMismatch {
                expected: Direction::South,
                got: 7
            })
        );
        assert_eq!(game.check_move_code(1, 2), Ok(Direction::South));
    }

    #[test]
    fn moves_after_the_end_are_rejected() {
        let mut game = game(1, 1, 1);
        game.apply_move(0, Direction::North).unwrap();
        assert!(game.is_over());
        assert_eq!(game.check_move(0, Direction::North), Err(IllegalMove::GameOver));
        assert_eq!(game.apply_move(0, Direction::North), Err(IllegalMove::GameOver));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn invalid_move_does_not_mutate() {
        let mut game = game(3, 2, 2);
        let before = game.board().clone();
        assert!(game.apply_move(5, Direction::North).is_err());
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_turn_number(), 0);
        assert_eq!(game.remaining_pieces(), &[2, 2]);
    }

    #[test]
    fn pruned_chain_does_not_score() {
        let mut game = game(1, 2, 2);
        game.apply_move(0, Direction::West).unwrap();
        assert_eq!(game.render_board(false, tile), "a#");
        game.apply_move(0, Direction::West).unwrap();
        assert_eq!(game.render_board(false, tile), "ba#");
        game.apply_move(0, Direction::North).unwrap();
        assert_eq!(game.render_board(false, tile), "ba#\nb..");
        game.apply_move(0, Direction::East).unwrap();
        assert_eq!(game.render_board(false, tile), "ba#a\n.b..");
        assert!(game.is_over());
        // Both `b`s are connected to the log only through `a`s
        assert_eq!(game.render_board(true, tile), ".a#a");
        assert_eq!(game.scores(), BTreeMap::from([(0, 2), (1, 0)]));
        assert_eq!(game.compute_winners(), BTreeSet::from([0]));
    }

    #[test]
    fn draw_returns_all_tied_players() {
        let mut game = game(1, 2, 1);
        // "a#", then "a#b"
        game.apply_move(0, Direction::West).unwrap();
        game.apply_move(0, Direction::East).unwrap();
        assert_eq!(game.render_board(false, tile), "a#b");
        assert!(game.is_over());
        assert_eq!(game.scores(), BTreeMap::from([(0, 1), (1, 1)]));
        assert_eq!(game.compute_winners(), BTreeSet::from([0, 1]));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut game = game(4, 3, 2);
        game.apply_move(1, Direction::East).unwrap();
        game.apply_move(0, Direction::South).unwrap();
        game.reset();
        let fresh = Game::new(game.config()).unwrap();
        assert_eq!(game.board(), fresh.board());
        assert_eq!(game.turn_state(), fresh.turn_state());
        assert_eq!(game.remaining_pieces(), fresh.remaining_pieces());
        assert!(game.history().is_empty());
        // The turn sequence starts over as well
        game.apply_move(0, Direction::West).unwrap();
        assert_eq!(game.current_turn(), Some((1, TurnDirection::Free)));
        game.apply_move(0, Direction::West).unwrap();
        assert_eq!(
            game.current_turn(),
            Some((1, TurnDirection::Forced(Direction::North)))
        );
    }

    #[test]
    fn parse_move_for_forced_turn() {
        let mut game = game(3, 2, 2);
        assert_eq!(game.parse_move("w2"), Ok(Move::new(1, Direction::West)));
        assert!(matches!(
            game.parse_move("2"),
            Err(IllegalMove::InvalidArgumentType { .. })
        ));
        game.play(Move::new(1, Direction::West)).unwrap();
        game.play(Move::new(1, Direction::West)).unwrap();
        assert_eq!(game.parse_move("2"), Ok(Move::new(1, Direction::North)));
        assert_eq!(game.parse_move("N2"), Ok(Move::new(1, Direction::North)));
        // Parsing accepts it, checking rejects it
        let mv = game.parse_move("E1").unwrap();
        assert!(matches!(
            game.check_move(mv.offset, mv.direction),
            Err(IllegalMove::DirectionMismatch { .. })
        ));
    }

    #[test]
    fn history_records_moves() {
        let mut game = game(2, 2, 2);
        game.apply_move(1, Direction::East).unwrap();
        game.apply_move(0, Direction::South).unwrap();
        game.apply_move(1, Direction::West).unwrap();
        let history: Vec<String> = game.history().iter().map(|r| r.to_string()).collect();
        assert_eq!(history, vec!["1. P1 E2", "2. P2 S1", "3. P2 W2"]);
    }

    #[test]
    fn rejects_empty_configs() {
        let config = GameConfig::default();
        for (bad, err) in [
            (GameConfig { log_row_length: 0, ..config }, ConfigError::NoLogs),
            (GameConfig { players: 0, ..config }, ConfigError::NoPlayers),
            (GameConfig { pieces_per_player: 0, ..config }, ConfigError::NoPieces),
        ] {
            assert_eq!(Game::new(bad).err(), Some(err));
        }
    }

    #[test]
    fn rejects_log_rows_beyond_coordinate_range() {
        let too_long = i32::MAX as usize + 1;
        let config = GameConfig {
            log_row_length: too_long,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TooManyLogs(too_long)));
        assert_eq!(Game::new(config).err(), Some(ConfigError::TooManyLogs(too_long)));
    }

    #[test]
    fn single_player_is_always_forced_after_the_opening() {
        let mut game = game(2, 1, 4);
        let mut turns = Vec::new();
        while let Some((_, direction)) = game.current_turn() {
            turns.push(direction);
            let direction = direction.forced().unwrap_or(Direction::West);
            game.apply_move(0, direction).unwrap();
        }
        assert_eq!(
            turns,
            vec![
                TurnDirection::Free,
                TurnDirection::Forced(Direction::North),
                TurnDirection::Forced(Direction::East),
                TurnDirection::Forced(Direction::South),
            ]
        );
    }
}

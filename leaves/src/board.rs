mod bbox;

use std::collections::BTreeMap;

pub use bbox::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Index of a player, in `0..players`.
pub type PlayerId = usize;

/// A cell position as `(x, y)`.
///
/// `x` counts columns from the left edge, `y` counts rows from the top edge.
pub type Coordinate = (i32, i32);

/// The four orthogonal neighbor offsets.
const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Something occupying a cell of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    /// One of the initial logs. Logs are pushed around like any other piece
    /// but never placed by a player and never removed.
    Log,
    /// A leaf placed by the given player.
    Player(PlayerId),
}

/// Represents a board with at least one piece on it.
//
// Because the board starts with a row of logs and pieces are never removed,
// the minimum and maximum coordinates always exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// There is exactly one entry in this map for every occupied cell.
    pieces: BTreeMap<Coordinate, Piece>,
}

impl Board {
    /// Creates a new board from a list of occupied cells and renormalizes it.
    ///
    /// Panics if there are no cells.
    pub fn new(pieces: impl IntoIterator<Item = (Coordinate, Piece)>) -> Self {
        let pieces: BTreeMap<Coordinate, Piece> = pieces.into_iter().collect();
        assert!(!pieces.is_empty(), "a board needs at least one piece");
        let mut board = Self { pieces };
        board.renormalize();
        board
    }

    /// The starting board: a single column of `len` logs at `x = 0`.
    ///
    /// Panics if `len` is zero or does not fit into a coordinate.
    pub fn log_row(len: usize) -> Self {
        let len = i32::try_from(len).expect("log row length exceeds the coordinate range");
        Self::new((0..len).map(|y| ((0, y), Piece::Log)))
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.pieces.contains_key(&coordinate)
    }

    pub fn get(&self, coordinate: Coordinate) -> Option<Piece> {
        self.pieces.get(&coordinate).copied()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Always false, kept for API symmetry with [`Self::len()`].
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The occupied cells, ordered by `x` first, then `y`.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        self.pieces.iter().map(|(&coordinate, &piece)| (coordinate, piece))
    }

    /// The smallest area enclosing all pieces.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_coordinates_iter(self.pieces.keys().copied())
            .expect("board is never empty")
    }

    /// `(width, height)` of the board, i.e. one more than the largest occupied
    /// `x` and `y`.
    pub fn size(&self) -> (i32, i32) {
        let bbox = self.bbox();
        (bbox.x_max + 1, bbox.y_max + 1)
    }

    /// Shifts every piece so that the smallest occupied `x` and `y` are not negative.
    ///
    /// Does nothing on a board that is already normalized.
    pub fn renormalize(&mut self) {
        let BoundingBox { x_min, y_min, .. } = self.bbox();
        let (shift_x, shift_y) = (-x_min.min(0), -y_min.min(0));
        if (shift_x, shift_y) == (0, 0) {
            return;
        }
        trace!(shift_x, shift_y, "Renormalizing board");
        self.pieces = std::mem::take(&mut self.pieces)
            .into_iter()
            .map(|((x, y), piece)| ((x + shift_x, y + shift_y), piece))
            .collect();
    }

    /// Pushes `piece` into the board at `entry`, moving in steps of `step`.
    ///
    /// Empty cells in front of the first piece on the line are skipped. From
    /// there on, every piece of the line is moved one step further until a
    /// piece lands in an empty cell. Returns the coordinate of that cell, which
    /// may lie just outside of the previous bounds (also negative ones, see
    /// [`Self::renormalize()`]).
    ///
    /// Panics if the line contains no piece at all, which cannot happen for a
    /// line inside the board's bounds.
    pub fn push(&mut self, entry: Coordinate, step: (i32, i32), piece: Piece) -> Coordinate {
        let bbox = self.bbox();
        let (dx, dy) = step;
        let (mut x, mut y) = entry;
        while !self.contains((x, y)) {
            x += dx;
            y += dy;
            assert!(
                bbox.contains((x, y)),
                "no piece on the line entering at {:?}",
                entry
            );
        }
        let mut moving_piece = Some(piece);
        while let Some(current) = moving_piece {
            moving_piece = self.pieces.insert((x, y), current);
            x += dx;
            y += dy;
        }
        (x - dx, y - dy)
    }

    /// A copy of the board with only the pieces that are logs or are directly
    /// next to a log.
    ///
    /// This looks at immediate neighbors only. A leaf touching another leaf
    /// that touches a log is removed.
    pub fn pruned(&self) -> Board {
        let is_log = |coordinate: Coordinate| self.get(coordinate) == Some(Piece::Log);
        let pieces = self
            .iter()
            .filter(|&((x, y), piece)| {
                piece == Piece::Log
                    || NEIGHBORS
                        .iter()
                        .any(|&(dx, dy)| is_log((x + dx, y + dy)))
            })
            .collect();
        Board { pieces }
    }

    /// How often each kind of piece occurs on this board.
    pub fn counts(&self) -> BTreeMap<Piece, usize> {
        let mut counts = BTreeMap::new();
        for piece in self.pieces.values() {
            *counts.entry(*piece).or_insert(0) += 1;
        }
        counts
    }

    /// Renders the board row by row, passing every cell of the enclosing
    /// area (`None` for empty ones) to `tile`.
    pub fn render<T: std::fmt::Display>(&self, mut tile: impl FnMut(Option<Piece>) -> T) -> String {
        let (width, height) = self.size();
        let mut result = String::new();
        for y in 0..height {
            if y > 0 {
                result.push('\n');
            }
            for x in 0..width {
                result += &tile(self.get((x, y))).to_string();
            }
        }
        result
    }
}

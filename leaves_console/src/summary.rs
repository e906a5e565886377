use std::collections::{BTreeMap, BTreeSet};

use leaves::{Game, GameConfig, MoveRecord, PlayerId};
use serde::Serialize;

/// The result of a finished game, for printing as JSON.
#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub config: GameConfig,
    pub scores: BTreeMap<PlayerId, usize>,
    /// More than one winner means a draw.
    pub winners: BTreeSet<PlayerId>,
    pub history: Vec<MoveRecord>,
}

impl GameSummary {
    pub fn new(game: &Game) -> Self {
        Self {
            config: game.config(),
            scores: game.scores(),
            winners: game.compute_winners(),
            history: game.history().to_vec(),
        }
    }
}

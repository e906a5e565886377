use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use leaves::GameConfig;

/// Loads a game configuration from a JSON file.
///
/// Missing keys fall back to [`GameConfig::default()`].
pub fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    let file = File::open(path)
        .with_context(|| format!("Could not open config file '{}'", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Could not parse config file '{}'", path.display()))?;
    Ok(config)
}

/// Values given on the command line, which take precedence over the config file.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigOverrides {
    pub log_row_length: Option<usize>,
    pub players: Option<usize>,
    pub pieces_per_player: Option<usize>,
}

impl ConfigOverrides {
    pub fn apply(self, config: GameConfig) -> GameConfig {
        GameConfig {
            log_row_length: self.log_row_length.unwrap_or(config.log_row_length),
            players: self.players.unwrap_or(config.players),
            pieces_per_player: self.pieces_per_player.unwrap_or(config.pieces_per_player),
        }
    }
}

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use leaves::{Game, GameConfig};
use leaves_console::{
    load_config, run_console, ConfigOverrides, ConsolePlayer, GameSummary, SessionEnd,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Play Leaves in the console.
///
/// Enter moves as the initial of the edge to push from, followed by the
/// row/column counted from the top left, e.g. `N1` or `W4`. Type `reset` to
/// start over and `quit` to leave.
#[derive(Parser)]
struct Args {
    /// Length of the initial row of logs
    #[arg(long)]
    logs: Option<usize>,

    /// Number of players
    #[arg(short, long)]
    players: Option<usize>,

    /// Number of pieces each player gets to place
    #[arg(long)]
    pieces: Option<usize>,

    /// Path to a JSON game config. Flags take precedence over its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a JSON summary of the finished game to stdout
    #[arg(long, default_value_t = false)]
    summary_json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let base_config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let config = ConfigOverrides {
        log_row_length: args.logs,
        players: args.players,
        pieces_per_player: args.pieces,
    }
    .apply(base_config);
    info!(?config, "Starting game");
    let mut game = Game::new(config)?;

    let mut player = ConsolePlayer::new(std::io::stdin().lock());
    let mut stdout = std::io::stdout().lock();
    let end = run_console(&mut game, &mut player, &mut stdout)?;

    if end == SessionEnd::GameOver && args.summary_json {
        serde_json::to_writer_pretty(&mut stdout, &GameSummary::new(&game))?;
        writeln!(stdout)?;
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout belongs to the game screen
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

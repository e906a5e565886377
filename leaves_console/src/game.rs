use std::io::{BufRead, Write};

use leaves::{boxed, default_tile, Axis, Game, Piece, PlayerId, TurnDirection};
use tracing::{debug, info};

use crate::player::{Command, ConsolePlayer};

/// Horizontal bar separating the screens.
const BAR: &str = "~:-------------------------------------------:~";

const TITLE: &str = r",_,   ,____   __   ,_    ,,____  ___
| |   | |_   / /\  \ \  / | |_  ( (`
|_|__ |_|__ /_/--\  \_\/  |_|__ _)_)";

/// How a console session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    GameOver,
    Quit,
}

pub fn player_name(player: PlayerId) -> String {
    match player {
        0 => String::from("First player"),
        1 => String::from("Second player"),
        2 => String::from("Third player"),
        3 => String::from("Fourth player"),
        _ => format!("Player {}", player + 1),
    }
}

fn width() -> usize {
    BAR.chars().count()
}

/// Centers every line of `text`.
fn centered(text: &str) -> String {
    text.lines()
        .map(|line| format!("{:^width$}", line, width = width()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plays `game` until it is over or the player quits.
///
/// Illegal moves are reported and asked for again.
pub fn run_console<R: BufRead, W: Write>(
    game: &mut Game,
    player: &mut ConsolePlayer<R>,
    out: &mut W,
) -> anyhow::Result<SessionEnd> {
    writeln!(out, "{}", BAR)?;
    writeln!(out, "{}", centered(TITLE))?;
    writeln!(out, "{}", centered("Leaves - abstract strategy game."))?;

    while !game.is_over() {
        write_status(game, out)?;
        loop {
            write!(out, "> ")?;
            out.flush()?;
            match player.read_command()? {
                Command::Quit => {
                    writeln!(out, "Goodbye")?;
                    return Ok(SessionEnd::Quit);
                }
                Command::Reset => {
                    info!("Game reset from the console");
                    game.reset();
                    break;
                }
                Command::Move(input) => {
                    match game.parse_move(&input).and_then(|mv| game.play(mv)) {
                        Ok(outcome) => {
                            debug!(?outcome, "Move accepted");
                            break;
                        }
                        Err(err) => {
                            debug!(%err, input = %input, "Move rejected");
                            writeln!(out, "Oops: {}", err)?;
                        }
                    }
                }
            }
        }
    }

    write_end_screen(game, out)?;
    Ok(SessionEnd::GameOver)
}

fn write_status<W: Write>(game: &Game, out: &mut W) -> anyhow::Result<()> {
    let Some((player, direction)) = game.current_turn() else {
        return Ok(());
    };
    writeln!(out, "{}", BAR)?;
    writeln!(out, "{}", centered(&format!("Turn {}", game.current_turn_number() + 1)))?;
    writeln!(
        out,
        "{}",
        centered(&format!(
            "{} {}",
            default_tile(Some(Piece::Player(player))),
            player_name(player)
        ))
    )?;
    let direction_text = match direction {
        TurnDirection::Free => String::from("⟳ *any direction*"),
        TurnDirection::Forced(dir) => format!("{} {}", dir.arrow(), dir),
    };
    writeln!(out, "{}", centered(&direction_text))?;
    writeln!(out, "{}", centered(&boxed(&game.render_board(false, default_tile))))?;
    let pieces_left = game
        .remaining_pieces()
        .iter()
        .enumerate()
        .map(|(p, remaining)| format!("{} {}", remaining, default_tile(Some(Piece::Player(p)))))
        .collect::<Vec<_>>()
        .join(" - ");
    writeln!(out, "{}", centered(&format!("[pieces left: {}]", pieces_left)))?;

    // Remind new players of the input format
    if game.current_turn_number() < 3 {
        match direction {
            TurnDirection::Free => {
                writeln!(out, "-> e.g. 'N1' = from North ↓ in 1st column,")?;
                writeln!(out, "        'W4' = from West ⟶  in 4th row, etc.")?;
            }
            TurnDirection::Forced(dir) => {
                let line = match dir.axis() {
                    Axis::Row => "row",
                    Axis::Column => "column",
                };
                writeln!(out, "-> e.g. '1' = from {} {} in 1st {}", dir.arrow(), dir, line)?;
            }
        }
    }
    Ok(())
}

fn write_end_screen<W: Write>(game: &Game, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "{}", BAR)?;
    writeln!(out, "{}", centered(&boxed(&game.render_board(false, default_tile))))?;
    writeln!(out, "{}", centered("Game Over."))?;
    writeln!(out, "{}", centered("Resulting pruned tree:"))?;
    writeln!(out, "{}", centered(&boxed(&game.render_board(true, default_tile))))?;
    let scores = game
        .scores()
        .into_iter()
        .map(|(p, score)| format!("{} {}", score, default_tile(Some(Piece::Player(p)))))
        .collect::<Vec<_>>()
        .join(" - ");
    writeln!(out, "{}", centered(&format!("Player scores: {}", scores)))?;

    let winners: Vec<PlayerId> = game.compute_winners().into_iter().collect();
    let text = match winners.as_slice() {
        [winner] => {
            let glyph = default_tile(Some(Piece::Player(*winner)));
            format!("⋆｡ﾟ☁｡ {} {} won the game! {} ｡ ﾟ☾｡⋆", glyph, player_name(*winner), glyph)
        }
        _ => format!(
            "It's a draw between {}!",
            winners
                .iter()
                .map(|&p| player_name(p))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    info!(?winners, "Game over");
    writeln!(out, "{}", centered(&boxed(&text)))?;
    writeln!(out, "{}", BAR)?;
    Ok(())
}

use std::borrow::Cow;

use crate::Piece;

/// Two characters per cell: `[]` for logs, shades for the first four players,
/// and the 1-based player number beyond that.
pub fn default_tile(piece: Option<Piece>) -> Cow<'static, str> {
    match piece {
        None => Cow::Borrowed("  "),
        Some(Piece::Log) => Cow::Borrowed("[]"),
        Some(Piece::Player(0)) => Cow::Borrowed("░░"),
        Some(Piece::Player(1)) => Cow::Borrowed("██"),
        Some(Piece::Player(2)) => Cow::Borrowed("▒▒"),
        Some(Piece::Player(3)) => Cow::Borrowed("▓▓"),
        Some(Piece::Player(p)) => Cow::Owned(format!("{:>2}", p + 1)),
    }
}

/// Draws a rounded box around a (possibly multi-line) text.
///
/// Shorter lines are padded on the right.
pub fn boxed(text: &str) -> String {
    let width = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    let mut result = String::from("╭");
    result += &"─".repeat(width);
    result += "╮\n";
    for line in text.lines() {
        let padding = width - line.chars().count();
        result += &format!("│{}{}│\n", line, " ".repeat(padding));
    }
    result += "╰";
    result += &"─".repeat(width);
    result += "╯";
    result
}

pub use board::*;
pub use direction::*;
pub use errors::*;
pub use game::*;
pub use notation::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod direction;
mod errors;
mod game;
mod notation;
mod turn;
mod visualization;

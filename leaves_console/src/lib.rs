mod config;
mod game;
mod player;
mod summary;
pub use config::*;
pub use game::*;
pub use player::*;
pub use summary::*;

//! Terminal widgets drawn around and over the board.

pub mod hud;
pub mod menu;

//! Grid-based Snake: a deterministic, tick-driven simulation core plus the
//! terminal and headless adapters that drive it.

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod headless;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

//! Games for the terminal arcade.
//!
//! Each game is a [`Game`](tui_arcade_engine::Game) implementation with its own
//! glyphs and tuning; the engine supplies the board, timing and input.

pub mod chopper;
pub mod snake;
pub mod tron;

pub use tui_arcade_core as core;
pub use tui_arcade_engine as engine;
pub use tui_arcade_types as types;

pub use chopper::Chopper;
pub use snake::Snake;
pub use tron::Tron;

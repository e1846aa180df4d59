//! Game lifecycle for the terminal arcade.
//!
//! [`Engine`] ties a [`Game`] to a [`term::Screen`] and an input thread and
//! walks it through start, play, game over and stop. Games only see the board
//! and session through a [`GameContext`].

pub mod engine;
pub mod error;
pub mod game;
pub mod signal;

pub use tui_arcade_core as core;
pub use tui_arcade_input as input;
pub use tui_arcade_term as term;
pub use tui_arcade_types as types;

pub use engine::{Engine, Phase};
pub use error::EngineError;
pub use game::{Game, GameContext, Session};
pub use signal::SignalGuard;

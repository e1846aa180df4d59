//! Terminal output for the arcade.
//!
//! Frames are composed from the board buffer and the scoreboard line into a
//! character framebuffer, then flushed to the terminal as a diff against the
//! previous frame. A refresh gate decides when to throw the terminal state
//! away and redraw from scratch.

pub mod frame;
pub mod refresh;
pub mod renderer;
pub mod screen;

pub use tui_arcade_core as core;
pub use tui_arcade_types as types;

pub use frame::Frame;
pub use refresh::RefreshGate;
pub use renderer::{
    encode_diff_into, encode_full_into, encode_restore_into, install_panic_hook, restore_terminal, TerminalRenderer,
};
pub use screen::Screen;

//! Terminal input module (engine-facing).
//!
//! Keys flow from a [`KeySource`] through the input thread into
//! [`SharedInput`]:
//!
//! - [`map`]: crossterm events to [`RawKey`]s, and the fixed key bindings
//! - [`decode`]: arrow escape sequences in raw byte streams
//! - [`source`]: the crossterm source and a scripted source for tests/replays
//! - [`state`]: the lock-free pending keystroke and the quit/kill flags
//! - [`thread`]: the polling loop that owns the key source

pub mod decode;
pub mod map;
pub mod source;
pub mod state;
pub mod thread;

pub use tui_arcade_core as core;
pub use tui_arcade_types as types;

pub use decode::{decode_all, decode_next, Decoded};
pub use map::{classify, is_quit_key, map_key_event, KeyAction, RawKey};
pub use source::{CrosstermKeys, KeyFeed, KeySource, ReplayKeys, ScriptedKeys};
pub use state::SharedInput;
pub use thread::{InputThread, POLL_TIMEOUT};

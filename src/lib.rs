//! Terminal arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, integration
//! tests and benches can write `tui_arcade::{core,engine,games,input,term,types}`.

pub use tui_arcade_core as core;
pub use tui_arcade_engine as engine;
pub use tui_arcade_games as games;
pub use tui_arcade_input as input;
pub use tui_arcade_term as term;
pub use tui_arcade_types as types;

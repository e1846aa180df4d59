//! The output seam between the engine and a terminal.

use anyhow::Result;

use crate::core::Board;

/// Something the engine can present frames to.
///
/// [`crate::TerminalRenderer`] drives a real terminal; tests substitute a
/// recording implementation.
pub trait Screen {
    /// Take over the terminal (raw mode, alternate screen, hidden cursor).
    fn enter(&mut self) -> Result<()>;

    /// Give the terminal back in the state `enter` found it.
    fn exit(&mut self) -> Result<()>;

    /// Tear the screen down and set it up again; the next present is a full redraw.
    fn reinitialize(&mut self) -> Result<()>;

    /// Paint the board frame with the scoreboard line under it and flush.
    fn present(&mut self, board: &Board, scoreboard: &str) -> Result<()>;
}

impl<S: Screen + ?Sized> Screen for Box<S> {
    fn enter(&mut self) -> Result<()> {
        (**self).enter()
    }

    fn exit(&mut self) -> Result<()> {
        (**self).exit()
    }

    fn reinitialize(&mut self) -> Result<()> {
        (**self).reinitialize()
    }

    fn present(&mut self, board: &Board, scoreboard: &str) -> Result<()> {
        (**self).present(board, scoreboard)
    }
}

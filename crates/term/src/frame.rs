//! Frame buffer flushed to the terminal: the board frame plus the scoreboard.

use crate::core::Board;

/// 2D buffer of characters, one per terminal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<char>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![' '; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the frame.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, ' ');
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = ch;
        }
    }

    pub fn row(&self, y: u16) -> &[char] {
        let start = (y as usize) * (self.width as usize);
        &self.cells[start..start + self.width as usize]
    }

    /// Copy the board frame and the scoreboard line below it.
    ///
    /// The frame grows wider than the board if the scoreboard does not fit.
    pub fn compose(&mut self, board: &Board, scoreboard: &str) {
        let stride = board.stride();
        let width = stride.max(scoreboard.chars().count()) as u16;
        let height = board.frame_height() as u16 + 1;
        self.resize(width, height);
        self.cells.fill(' ');

        for (y, row) in board.rows().enumerate() {
            let start = y * width as usize;
            self.cells[start..start + stride].copy_from_slice(row);
        }
        for (x, ch) in scoreboard.chars().enumerate() {
            self.set(x as u16, height - 1, ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Glyphs, Location};

    #[test]
    fn compose_places_board_then_scoreboard() {
        let mut board = Board::new(23, 6, "T", Glyphs::default());
        board.paint_char(Location::new(0, 0), '#');

        let mut frame = Frame::new(0, 0);
        frame.compose(&board, "score");
        assert_eq!(frame.width(), 25);
        assert_eq!(frame.height(), 10);
        assert_eq!(frame.get(0, 1), Some('+'));
        assert_eq!(frame.get(1, 2), Some('#'));
        let last: String = frame.row(9).iter().collect();
        assert_eq!(last.trim_end(), "score");
    }

    #[test]
    fn long_scoreboard_widens_frame() {
        let board = Board::new(23, 6, "", Glyphs::default());
        let mut frame = Frame::new(0, 0);
        frame.compose(&board, &"x".repeat(30));
        assert_eq!(frame.width(), 30);
        assert_eq!(frame.get(29, 9), Some('x'));
        assert_eq!(frame.get(25, 1), Some(' '));
    }
}

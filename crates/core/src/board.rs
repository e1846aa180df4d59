//! Board module - the character grid games paint on
//!
//! The board is a flat `Vec<char>` holding the whole frame, row-major:
//!
//! ```text
//!  title row       (TITLE_HEIGHT)
//!  +-----------+   top border
//!  |           |   H interior rows, each flanked by vertical borders
//!  +-----------+   bottom border
//! ```
//!
//! Every row is `width + 2 * BORDER_WIDTH` cells wide. Games address the
//! interior with logical `(row, col)` locations; the frame is painted once at
//! construction and never touched again.

use crate::types::{Glyphs, Location, BORDER_HEIGHT, BORDER_WIDTH, TITLE_HEIGHT};

/// Fixed-size character grid with title and border frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    title: String,
    glyphs: Glyphs,
    cells: Vec<char>,
}

impl Board {
    /// Allocate a board and paint its frame and empty interior.
    ///
    /// Dimensions are expected to be validated by the caller (see
    /// [`EngineConfig::validate`](crate::config::EngineConfig::validate)).
    pub fn new(width: u16, height: u16, title: &str, glyphs: Glyphs) -> Self {
        let stride = (width + 2 * BORDER_WIDTH) as usize;
        let rows = (height + TITLE_HEIGHT + 2 * BORDER_HEIGHT) as usize;
        let mut board = Self {
            width,
            height,
            title: title.to_string(),
            glyphs,
            cells: vec![glyphs.fill; stride * rows],
        };
        board.paint_frame();
        board
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn glyphs(&self) -> Glyphs {
        self.glyphs
    }

    /// Cells per frame row, borders included.
    pub fn stride(&self) -> usize {
        (self.width + 2 * BORDER_WIDTH) as usize
    }

    /// Frame rows, title and borders included.
    pub fn frame_height(&self) -> usize {
        (self.height + TITLE_HEIGHT + 2 * BORDER_HEIGHT) as usize
    }

    /// The whole frame, row-major.
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Frame rows from the title down to the bottom border.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.cells.chunks(self.stride())
    }

    /// Whether `loc` lies inside the interior.
    pub fn contains(&self, loc: Location) -> bool {
        loc.row >= 0 && loc.col >= 0 && (loc.row as u16) < self.height && (loc.col as u16) < self.width
    }

    #[inline(always)]
    fn index(&self, loc: Location) -> Option<usize> {
        if !self.contains(loc) {
            return None;
        }
        let row = (TITLE_HEIGHT + BORDER_HEIGHT) as usize + loc.row as usize;
        Some(row * self.stride() + BORDER_WIDTH as usize + loc.col as usize)
    }

    /// Paint one glyph. Returns false (and paints nothing) outside the interior.
    pub fn paint_char(&mut self, loc: Location, glyph: char) -> bool {
        match self.index(loc) {
            Some(idx) => {
                self.cells[idx] = glyph;
                true
            }
            None => false,
        }
    }

    /// The glyph at `loc`, or `None` outside the interior.
    pub fn read_char(&self, loc: Location) -> Option<char> {
        self.index(loc).map(|idx| self.cells[idx])
    }

    /// Whether `loc` is inside the interior and holds the fill glyph.
    pub fn is_clear(&self, loc: Location) -> bool {
        self.read_char(loc) == Some(self.glyphs.fill)
    }

    /// Reset every interior cell to the fill glyph.
    pub fn clear_interior(&mut self) {
        let stride = self.stride();
        let first = (TITLE_HEIGHT + BORDER_HEIGHT) as usize;
        let left = BORDER_WIDTH as usize;
        let fill = self.glyphs.fill;
        for row in first..first + self.height as usize {
            let start = row * stride + left;
            self.cells[start..start + self.width as usize].fill(fill);
        }
    }

    /// Center `text` on interior `line`.
    ///
    /// Nothing is painted when the text is wider than the board or the line is
    /// outside the interior.
    pub fn paint_centered_text(&mut self, line: i16, text: &str) -> bool {
        let len = text.chars().count();
        if len > self.width as usize || line < 0 || line as u16 >= self.height {
            return false;
        }
        let start = (self.width as usize / 2 - len / 2) as i16;
        for (i, ch) in text.chars().enumerate() {
            self.paint_char(Location::new(line, start + i as i16), ch);
        }
        true
    }

    fn paint_frame(&mut self) {
        let stride = self.stride();
        let w = self.width as usize;
        let g = self.glyphs;

        // Title row: fill glyph on both edges, title centred over the interior.
        let title: Vec<char> = self.title.chars().collect();
        let title_row = &mut self.cells[0..stride];
        title_row.fill(g.title);
        if title.len() <= w {
            let start = BORDER_WIDTH as usize + w / 2 - title.len() / 2;
            title_row[start..start + title.len()].copy_from_slice(&title);
        }

        let top = TITLE_HEIGHT as usize;
        let bottom = self.frame_height() - 1;
        for row in [top, bottom] {
            let line = &mut self.cells[row * stride..(row + 1) * stride];
            line.fill(g.horizontal);
            line[0] = g.corner;
            line[stride - 1] = g.corner;
        }

        for row in top + 1..bottom {
            let line = &mut self.cells[row * stride..(row + 1) * stride];
            line.fill(g.fill);
            line[0] = g.vertical;
            line[stride - 1] = g.vertical;
        }
    }
}

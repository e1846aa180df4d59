//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the arcade.
//! All types are plain data with no I/O, so they can be shared by the board,
//! the input thread, the renderer and the games alike.
//!
//! # Board Metrics
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_WIDTH` / `MAX_WIDTH` | 23 / 128 | Interior columns |
//! | `MIN_HEIGHT` / `MAX_HEIGHT` | 6 / 48 | Interior rows |
//! | `MIN_SPEED` / `MAX_SPEED` | 1 / 10 | Speed class |
//! | `TITLE_HEIGHT` | 1 | Rows above the top border |
//! | `BORDER_WIDTH` / `BORDER_HEIGHT` | 1 / 1 | Frame thickness |
//!
//! # Timing
//!
//! - `BASE_DELAY_MS`: 150ms, divided by the speed class after every tick
//! - `INPUT_POLL_MS`: 100ms, the input thread's poll timeout
//!
//! # Keystrokes
//!
//! A [`Keystroke`] is a bit set. The arrow keys drive the primary scheme,
//! `w`/`s`/`d`/`a` drive the secondary scheme (second player or alternate
//! binding), and [`Keystroke::QUIT`] stands alone.
//!
//! ```
//! use tui_arcade_types::{Direction, Keystroke, Scheme};
//!
//! let key = Keystroke::from_direction(Direction::Left, Scheme::Secondary);
//! assert_eq!(key, Keystroke::LEFT2);
//! assert_eq!(key.direction(), Some(Direction::Left));
//! assert_eq!(Keystroke::UP.scheme_mask(), Keystroke::PRIMARY);
//! ```

use bitflags::bitflags;

/// Minimum interior width in columns.
pub const MIN_WIDTH: u16 = 23;

/// Maximum interior width in columns.
pub const MAX_WIDTH: u16 = 128;

/// Minimum interior height in rows.
pub const MIN_HEIGHT: u16 = 6;

/// Maximum interior height in rows.
pub const MAX_HEIGHT: u16 = 48;

/// Slowest speed class.
pub const MIN_SPEED: u8 = 1;

/// Fastest speed class.
pub const MAX_SPEED: u8 = 10;

/// Largest accepted explicit refresh interval, in frames.
pub const MAX_REFRESH_FRAMES: u32 = 30;

pub const DEFAULT_WIDTH: u16 = 40;
pub const DEFAULT_HEIGHT: u16 = 15;
pub const DEFAULT_SPEED: u8 = 1;

/// Rows taken by the title line.
pub const TITLE_HEIGHT: u16 = 1;

/// Columns taken by each vertical border.
pub const BORDER_WIDTH: u16 = 1;

/// Rows taken by each horizontal border.
pub const BORDER_HEIGHT: u16 = 1;

/// Titles must leave room for at least one fill glyph on each side of the
/// narrowest board.
pub const MAX_TITLE_LEN: usize = MIN_WIDTH as usize - 1;

/// Delay after a tick at speed 1; higher speeds divide it.
pub const BASE_DELAY_MS: u64 = 150;

/// Input thread poll timeout.
pub const INPUT_POLL_MS: u64 = 100;

pub const REFRESH_KEY: char = 'r';
pub const QUIT_KEY: char = 'q';

pub const GAME_OVER_MESSAGE: &str = " GAME OVER ";
pub const PLAY_MESSAGE: &str = " PRESS ANY KEY TO PLAY ";
pub const EXIT_MESSAGE: &str = " PRESS ANY KEY TO EXIT ";

/// The prompt telling the player how to quit.
pub fn quit_message() -> String {
    format!(" PRESS '{QUIT_KEY}' TO QUIT ")
}

/// Milliseconds to sleep after a tick at the given speed class.
///
/// ```
/// use tui_arcade_types::tick_delay_ms;
///
/// assert_eq!(tick_delay_ms(1), 150);
/// assert_eq!(tick_delay_ms(10), 15);
/// ```
pub fn tick_delay_ms(speed: u8) -> u64 {
    BASE_DELAY_MS / u64::from(speed.max(MIN_SPEED))
}

bitflags! {
    /// Decoded input signal.
    ///
    /// Directions from both schemes may be combined; `QUIT` never is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keystroke: u16 {
        const UP = 1;
        const DOWN = 1 << 1;
        const RIGHT = 1 << 2;
        const LEFT = 1 << 3;

        const UP2 = 1 << 4;
        const DOWN2 = 1 << 5;
        const RIGHT2 = 1 << 6;
        const LEFT2 = 1 << 7;

        const QUIT = 1 << 8;

        const PRIMARY = Self::UP.bits() | Self::DOWN.bits() | Self::RIGHT.bits() | Self::LEFT.bits();
        const SECONDARY = Self::UP2.bits() | Self::DOWN2.bits() | Self::RIGHT2.bits() | Self::LEFT2.bits();
    }
}

impl Keystroke {
    /// The key for `dir` in the given scheme.
    pub fn from_direction(dir: Direction, scheme: Scheme) -> Self {
        let base = match dir {
            Direction::Up => Keystroke::UP,
            Direction::Down => Keystroke::DOWN,
            Direction::Right => Keystroke::RIGHT,
            Direction::Left => Keystroke::LEFT,
        };
        match scheme {
            Scheme::Primary => base,
            Scheme::Secondary => Keystroke::from_bits_truncate(base.bits() << 4),
        }
    }

    /// The whole scheme group this key belongs to (empty for `QUIT`/none).
    pub fn scheme_mask(self) -> Self {
        if self.intersects(Keystroke::PRIMARY) {
            Keystroke::PRIMARY
        } else if self.intersects(Keystroke::SECONDARY) {
            Keystroke::SECONDARY
        } else {
            Keystroke::empty()
        }
    }

    /// The primary-scheme bits only.
    pub fn primary(self) -> Self {
        self & Keystroke::PRIMARY
    }

    /// The secondary-scheme bits only.
    pub fn secondary(self) -> Self {
        self & Keystroke::SECONDARY
    }

    /// First direction present in either scheme, checked up, down, right, left.
    pub fn direction(self) -> Option<Direction> {
        if self.intersects(Keystroke::UP | Keystroke::UP2) {
            Some(Direction::Up)
        } else if self.intersects(Keystroke::DOWN | Keystroke::DOWN2) {
            Some(Direction::Down)
        } else if self.intersects(Keystroke::RIGHT | Keystroke::RIGHT2) {
            Some(Direction::Right)
        } else if self.intersects(Keystroke::LEFT | Keystroke::LEFT2) {
            Some(Direction::Left)
        } else {
            None
        }
    }

    pub fn is_quit(self) -> bool {
        self.contains(Keystroke::QUIT)
    }
}

/// One of the two key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Arrow keys.
    Primary,
    /// `w`/`s`/`d`/`a`.
    Secondary,
}

impl Scheme {
    pub fn mask(self) -> Keystroke {
        match self {
            Scheme::Primary => Keystroke::PRIMARY,
            Scheme::Secondary => Keystroke::SECONDARY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Row and column step for one move.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
        }
    }
}

/// A logical cell of the board interior.
///
/// Signed so games can step off the edge and let the board reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub row: i16,
    pub col: i16,
}

impl Location {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// The neighbouring location one step towards `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

/// Result of one tick of game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep playing.
    Continue,
    /// The current session ended; the player may replay.
    GameOver,
    /// The whole program should terminate.
    Quit,
}

/// Frame and fill glyphs of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Fill around the title text.
    pub title: char,
    pub corner: char,
    pub horizontal: char,
    pub vertical: char,
    /// Interior fill; anything else in the interior counts as painted.
    pub fill: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            title: ' ',
            corner: '+',
            horizontal: '-',
            vertical: '|',
            fill: ' ',
        }
    }
}

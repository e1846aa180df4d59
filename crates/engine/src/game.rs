//! The pluggable game seam.
//!
//! A game is a value implementing [`Game`]. The engine owns it and calls its
//! hooks on the main thread with a [`GameContext`] giving access to the board,
//! the session counters and the pending keystroke.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::{Board, ConfigError, EngineConfig};
use crate::input::SharedInput;
use crate::types::{Glyphs, Keystroke, Location, Outcome, MAX_SPEED, MIN_SPEED};

pub trait Game {
    /// Shown centred in the title row unless the configuration sets one.
    fn title(&self) -> &str;

    /// Adjust the configuration before it is validated.
    ///
    /// Games set their key policy, scoring and clearing here and reject glyphs
    /// that would clash with the board fill.
    fn configure(&mut self, _config: &mut EngineConfig) -> Result<(), ConfigError> {
        Ok(())
    }

    /// One-time setup once the terminal and board exist. An error aborts start.
    fn initialize(&mut self, _ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Paint the opening state of a new game.
    fn reset(&mut self, _ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Advance one tick. `Keystroke::QUIT` must yield [`Outcome::Quit`].
    fn step(&mut self, key: Keystroke, ctx: &mut GameContext<'_>) -> Outcome;

    /// Epilogue after a game over. Returning false suppresses the generic banner.
    fn over(&mut self, _ctx: &mut GameContext<'_>) -> bool {
        true
    }

    fn stop(&mut self) {}
}

impl<G: Game + ?Sized> Game for Box<G> {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn configure(&mut self, config: &mut EngineConfig) -> Result<(), ConfigError> {
        (**self).configure(config)
    }

    fn initialize(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        (**self).initialize(ctx)
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        (**self).reset(ctx)
    }

    fn step(&mut self, key: Keystroke, ctx: &mut GameContext<'_>) -> Outcome {
        (**self).step(key, ctx)
    }

    fn over(&mut self, ctx: &mut GameContext<'_>) -> bool {
        (**self).over(ctx)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Counters that live for one engine run and are mutable from game hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub score: u32,
    pub speed: u8,
    pub initial_key: Keystroke,
}

impl Session {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            score: 0,
            speed: config.speed,
            initial_key: config.initial_key,
        }
    }
}

/// What a game hook may touch.
pub struct GameContext<'a> {
    board: &'a mut Board,
    session: &'a mut Session,
    rng: &'a mut StdRng,
    input: &'a SharedInput,
}

impl<'a> GameContext<'a> {
    pub fn new(board: &'a mut Board, session: &'a mut Session, rng: &'a mut StdRng, input: &'a SharedInput) -> Self {
        Self {
            board,
            session,
            rng,
            input,
        }
    }

    pub fn paint_char(&mut self, loc: Location, glyph: char) -> bool {
        self.board.paint_char(loc, glyph)
    }

    pub fn read_char(&self, loc: Location) -> Option<char> {
        self.board.read_char(loc)
    }

    /// Inside the board and not painted.
    pub fn is_clear(&self, loc: Location) -> bool {
        self.board.is_clear(loc)
    }

    pub fn paint_centered_text(&mut self, line: i16, text: &str) -> bool {
        self.board.paint_centered_text(line, text)
    }

    /// A uniformly random interior cell.
    pub fn random_location(&mut self) -> Location {
        self.random_location_bounded(0, 0)
    }

    /// A uniformly random interior cell with `row >= min_row` and `col >= min_col`.
    ///
    /// Margins larger than the board collapse onto the last row or column.
    pub fn random_location_bounded(&mut self, min_row: u16, min_col: u16) -> Location {
        let rows = span(min_row, self.board.height());
        let cols = span(min_col, self.board.width());
        Location::new(self.rng.gen_range(rows) as i16, self.rng.gen_range(cols) as i16)
    }

    /// Forget the pending keystroke so the next tick sees only new presses.
    pub fn clear_keystroke(&mut self) {
        self.input.clear_pending();
    }

    /// Keystroke the pending cell is set to at the start of each game.
    pub fn set_initial_key(&mut self, key: Keystroke) {
        self.session.initial_key = key;
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn set_score(&mut self, score: u32) {
        self.session.score = score;
    }

    pub fn add_score(&mut self, points: u32) {
        self.session.score = self.session.score.saturating_add(points);
    }

    pub fn speed(&self) -> u8 {
        self.session.speed
    }

    /// Change the speed class. Out-of-range values are refused.
    pub fn set_speed(&mut self, speed: u8) -> bool {
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return false;
        }
        self.session.speed = speed;
        true
    }

    pub fn width(&self) -> u16 {
        self.board.width()
    }

    pub fn height(&self) -> u16 {
        self.board.height()
    }

    pub fn glyphs(&self) -> Glyphs {
        self.board.glyphs()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        self.rng
    }
}

fn span(min: u16, len: u16) -> RangeInclusive<u16> {
    let last = len.saturating_sub(1);
    min.min(last)..=last
}

//! Snake: eat, grow, don't bite yourself.

use std::collections::VecDeque;

use crate::core::{check_distinct_from_fill, check_printable, ConfigError, EngineConfig, KeyPolicy};
use crate::engine::{Game, GameContext};
use crate::types::{Direction, Keystroke, Location, Outcome};

pub const TITLE: &str = " SNAKE ";
pub const DEFAULT_HEAD: char = '@';
pub const DEFAULT_BODY: char = 'o';
pub const DEFAULT_FOOD: char = '*';
pub const DEFAULT_LENGTH: u16 = 20;

const FOOD_ATTEMPTS: usize = 64;

#[derive(Debug, Clone)]
pub struct Snake {
    head: char,
    body: char,
    food: char,
    length: u16,

    /// Tail first, head last.
    segments: VecDeque<Location>,
    direction: Direction,
    food_at: Option<Location>,
}

impl Default for Snake {
    fn default() -> Self {
        Self {
            head: DEFAULT_HEAD,
            body: DEFAULT_BODY,
            food: DEFAULT_FOOD,
            length: DEFAULT_LENGTH,
            segments: VecDeque::new(),
            direction: Direction::Right,
            food_at: None,
        }
    }
}

impl Snake {
    pub fn with_glyphs(mut self, head: char, body: char, food: char) -> Self {
        self.head = head;
        self.body = body;
        self.food = food;
        self
    }

    /// Starting length. Must stay below the board width.
    pub fn with_length(mut self, length: u16) -> Self {
        self.length = length;
        self
    }

    pub fn head(&self) -> Option<Location> {
        self.segments.back().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn food(&self) -> Option<Location> {
        self.food_at
    }

    fn place_food(&self, ctx: &mut GameContext<'_>, min_row: u16, min_col: u16) -> Option<Location> {
        for _ in 0..FOOD_ATTEMPTS {
            let loc = ctx.random_location_bounded(min_row, min_col);
            if !self.segments.contains(&loc) {
                return Some(loc);
            }
        }
        let (w, h) = (ctx.width() as i16, ctx.height() as i16);
        (0..h)
            .flat_map(|row| (0..w).map(move |col| Location::new(row, col)))
            .find(|loc| !self.segments.contains(loc))
    }

    fn paint(&self, ctx: &mut GameContext<'_>) {
        if let Some(food) = self.food_at {
            ctx.paint_char(food, self.food);
        }
        for &segment in &self.segments {
            ctx.paint_char(segment, self.body);
        }
        if let Some(head) = self.head() {
            ctx.paint_char(head, self.head);
        }
    }
}

/// One step towards `dir`, coming back in on the opposite edge.
fn wrap(loc: Location, dir: Direction, width: u16, height: u16) -> Location {
    let next = loc.step(dir);
    Location::new(next.row.rem_euclid(height as i16), next.col.rem_euclid(width as i16))
}

impl Game for Snake {
    fn title(&self) -> &str {
        TITLE
    }

    fn configure(&mut self, config: &mut EngineConfig) -> Result<(), ConfigError> {
        for (name, glyph) in [("head", self.head), ("body", self.body), ("food", self.food)] {
            check_printable(name, glyph)?;
            check_distinct_from_fill(name, glyph, config.glyphs.fill)?;
        }
        if self.length == 0 || self.length >= config.width {
            return Err(ConfigError::Game(format!(
                "snake length {} must be between 1 and {}",
                self.length,
                config.width.saturating_sub(1)
            )));
        }

        config.policy = KeyPolicy::OVERWRITE;
        config.clear_each_tick = true;
        config.initial_key = Keystroke::RIGHT;
        Ok(())
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        self.segments = (0..self.length as i16).map(|col| Location::new(0, col)).collect();
        self.direction = Direction::Right;
        self.food_at = self.place_food(ctx, 1, self.length);
        self.paint(ctx);
        Ok(())
    }

    fn step(&mut self, key: Keystroke, ctx: &mut GameContext<'_>) -> Outcome {
        if key.is_quit() {
            return Outcome::Quit;
        }
        let Some(head) = self.head() else {
            return Outcome::GameOver;
        };

        let mut dir = key.direction().unwrap_or(self.direction);
        if dir == self.direction.opposite() {
            dir = self.direction;
        }
        let next = wrap(head, dir, ctx.width(), ctx.height());
        let grows = self.food_at == Some(next);

        // The tail moves out of the way unless the snake grows this step.
        let skip = usize::from(!grows);
        if self.segments.iter().skip(skip).any(|&s| s == next) {
            return Outcome::GameOver;
        }

        self.direction = dir;
        self.segments.push_back(next);
        if grows {
            ctx.add_score(1);
            self.food_at = self.place_food(ctx, 0, 0);
        } else {
            self.segments.pop_front();
        }
        self.paint(ctx);
        Outcome::Continue
    }
}

//! Chopper: fly through a scrolling cave.
//!
//! The cave scrolls one column per tick. Its floor and ceiling walk up and
//! down at random, and now and then a loose obstacle appears in the middle.
//! Every level interval the game gets harder: obstacles come more often, then
//! the walls get jumpier, then the speed goes up.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::core::{check_distinct_from_fill, check_printable, ConfigError, EngineConfig, KeyPolicy};
use crate::engine::{Game, GameContext};
use crate::types::{Keystroke, Location, Outcome};

pub const TITLE: &str = " CHOPPER ";
pub const DEFAULT_CHOPPER: char = '>';
pub const DEFAULT_OBSTACLE: char = '?';

const OBSTACLE_SECS: u64 = 3;
const PEAK_WIDTH: u32 = 5;
const LEVEL_INTERVAL: Duration = Duration::from_secs(10);
/// Rows always left open between floor and ceiling.
const MIN_GAP: i16 = 5;

#[derive(Debug, Clone)]
pub struct Chopper {
    chopper: char,
    obstacle: char,
    level_interval: Duration,
    base_speed: u8,

    position: Location,
    /// Ring index of the leftmost visible column.
    offset: usize,
    /// Per column, rows of ceiling (the floor fills up to `level` cells in total).
    edges: Vec<Option<i16>>,
    /// Per column, a loose obstacle's distance below the ceiling.
    middles: Vec<Option<i16>>,
    level: i16,
    obstacle_secs: u64,
    peak_width: u32,
    count: u32,
    last_obstacle: Instant,
    last_level: Instant,
}

impl Default for Chopper {
    fn default() -> Self {
        Self::new(DEFAULT_CHOPPER, DEFAULT_OBSTACLE)
    }
}

impl Chopper {
    pub fn new(chopper: char, obstacle: char) -> Self {
        let now = Instant::now();
        Self {
            chopper,
            obstacle,
            level_interval: LEVEL_INTERVAL,
            base_speed: 1,
            position: Location::default(),
            offset: 0,
            edges: Vec::new(),
            middles: Vec::new(),
            level: 0,
            obstacle_secs: OBSTACLE_SECS,
            peak_width: PEAK_WIDTH,
            count: 0,
            last_obstacle: now,
            last_level: now,
        }
    }

    /// How long each level lasts.
    pub fn with_level_interval(mut self, interval: Duration) -> Self {
        self.level_interval = interval;
        self
    }

    pub fn position(&self) -> Location {
        self.position
    }

    fn level_up(&mut self, ctx: &mut GameContext<'_>, last: usize) {
        let now = Instant::now();
        self.position.row = ctx.height() as i16 / 2;
        self.edges[last] = None;
        self.last_level = now;
        self.last_obstacle = now;
        self.count = 0;

        if self.obstacle_secs > 1 {
            self.obstacle_secs -= 1;
        } else if self.peak_width > 1 {
            self.peak_width -= 1;
        } else {
            let speed = ctx.speed().saturating_add(1);
            ctx.set_speed(speed);
        }
        tracing::debug!(
            obstacle_secs = self.obstacle_secs,
            peak_width = self.peak_width,
            speed = ctx.speed(),
            "chopper level up"
        );
    }

    /// Ceiling height of the column entering on the right.
    fn next_edge(&mut self, ctx: &mut GameContext<'_>, last: usize) -> Option<i16> {
        let height = ctx.height() as i16;
        match self.edges[last] {
            None if self.edges[self.offset].is_none() => {
                if height - self.level > MIN_GAP {
                    self.level += 1;
                }
                self.count = 0;
                ctx.add_score(1);
                Some(ctx.rng().gen_range(0..=self.level))
            }
            None => None,
            Some(edge) => {
                self.count += 1;
                if self.count < self.peak_width {
                    return Some(edge);
                }
                self.count = 0;
                let edge = match ctx.rng().gen_range(0..3) {
                    0 if edge > 0 => edge - 1,
                    2 if edge < self.level => edge + 1,
                    _ => edge,
                };
                Some(edge)
            }
        }
    }

    fn paint_cave(&self, ctx: &mut GameContext<'_>) {
        let width = self.edges.len();
        let height = ctx.height() as i16;
        for col in 0..width {
            let idx = (col + self.offset) % width;
            let Some(edge) = self.edges[idx] else {
                continue;
            };
            for row in 0..self.level {
                let row = if row < edge { row } else { height - row + edge - 1 };
                ctx.paint_char(Location::new(row, col as i16), self.obstacle);
            }
            if let Some(middle) = self.middles[idx] {
                ctx.paint_char(Location::new(edge + middle, col as i16), self.obstacle);
            }
        }
    }

    fn fly(&mut self, key: Keystroke, ctx: &GameContext<'_>) -> Outcome {
        let height = ctx.height() as i16;
        if key.intersects(Keystroke::UP | Keystroke::UP2) {
            if self.position.row == 0 {
                return Outcome::GameOver;
            }
            self.position.row -= 1;
        } else if key.intersects(Keystroke::DOWN | Keystroke::DOWN2) {
            self.position.row += 1;
            if self.position.row >= height {
                return Outcome::GameOver;
            }
        }
        if ctx.is_clear(self.position) {
            Outcome::Continue
        } else {
            Outcome::GameOver
        }
    }
}

impl Game for Chopper {
    fn title(&self) -> &str {
        TITLE
    }

    fn configure(&mut self, config: &mut EngineConfig) -> Result<(), ConfigError> {
        check_printable("chopper", self.chopper)?;
        check_printable("obstacle", self.obstacle)?;
        if self.chopper == self.obstacle {
            return Err(ConfigError::Game(format!(
                "chopper and obstacle glyphs are both {:?}",
                self.chopper
            )));
        }
        check_distinct_from_fill("chopper", self.chopper, config.glyphs.fill)?;
        check_distinct_from_fill("obstacle", self.obstacle, config.glyphs.fill)?;

        config.policy = KeyPolicy::OVERWRITE;
        config.clear_each_tick = true;
        config.initial_key = Keystroke::empty();
        self.base_speed = config.speed;
        Ok(())
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        let width = ctx.width() as usize;
        let height = ctx.height() as i16;
        let now = Instant::now();

        self.position = Location::new(height / 2, width as i16 / 5);
        self.offset = 0;
        self.edges = vec![None; width];
        self.middles = vec![None; width];
        self.level = height / 3;
        self.obstacle_secs = OBSTACLE_SECS;
        self.peak_width = PEAK_WIDTH;
        self.count = 0;
        self.last_obstacle = now;
        self.last_level = now;

        ctx.paint_char(self.position, self.chopper);
        ctx.set_speed(self.base_speed);
        ctx.set_score(0);
        ctx.clear_keystroke();
        Ok(())
    }

    fn step(&mut self, key: Keystroke, ctx: &mut GameContext<'_>) -> Outcome {
        if key.is_quit() {
            return Outcome::Quit;
        }
        let width = self.edges.len();
        if width == 0 {
            return Outcome::GameOver;
        }
        let last = (self.offset + width - 1) % width;

        if self.last_level.elapsed() >= self.level_interval {
            self.level_up(ctx, last);
        }

        let edge = self.next_edge(ctx, last);
        let mut middle = None;
        if self.last_obstacle.elapsed().as_secs() >= self.obstacle_secs {
            let gap = (ctx.height() as i16 - self.level).max(1);
            middle = Some(ctx.rng().gen_range(0..gap));
            self.last_obstacle = Instant::now();
        }

        self.offset = (self.offset + 1) % width;
        let last = (self.offset + width - 1) % width;
        self.edges[last] = edge;
        self.middles[last] = middle;
        self.paint_cave(ctx);

        let outcome = self.fly(key, ctx);
        if outcome != Outcome::Continue {
            return outcome;
        }
        ctx.paint_char(self.position, self.chopper);
        ctx.clear_keystroke();
        Outcome::Continue
    }
}

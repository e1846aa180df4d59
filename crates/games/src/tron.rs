//! Tron: two light cycles, one keyboard.
//!
//! Player one steers with `w`/`s`/`d`/`a`, player two with the arrow keys. Both
//! schemes are merged into the pending keystroke so the players can press
//! within the same tick. The board is never cleared between ticks; the trails
//! are the board.

use crate::core::{check_distinct_from_fill, check_printable, ConfigError, EngineConfig, KeyPolicy};
use crate::engine::{Game, GameContext};
use crate::types::{Direction, Keystroke, Location, Outcome, Scheme};

pub const TITLE: &str = " TRON ";
pub const DEFAULT_P1: char = '1';
pub const DEFAULT_P2: char = '2';
pub const DEFAULT_VERTICAL_TRAIL: char = '|';
pub const DEFAULT_HORIZONTAL_TRAIL: char = '-';

pub const P1_WINS: &str = " P1 WINS! ";
pub const P2_WINS: &str = " P2 WINS! ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    One,
    Two,
}

#[derive(Debug, Clone, Copy)]
struct Cycle {
    glyph: char,
    scheme: Scheme,
    position: Location,
    direction: Direction,
}

impl Cycle {
    fn new(glyph: char, scheme: Scheme) -> Self {
        Self {
            glyph,
            scheme,
            position: Location::default(),
            direction: Direction::Up,
        }
    }

    /// The direction this player asked for, ignoring reversals.
    fn turn(&self, key: Keystroke) -> Direction {
        match (key & self.scheme.mask()).direction() {
            Some(dir) if dir != self.direction.opposite() => dir,
            _ => self.direction,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tron {
    vertical: char,
    horizontal: char,
    players: [Cycle; 2],
    winner: Option<Winner>,
}

impl Default for Tron {
    fn default() -> Self {
        Self {
            vertical: DEFAULT_VERTICAL_TRAIL,
            horizontal: DEFAULT_HORIZONTAL_TRAIL,
            players: [
                Cycle::new(DEFAULT_P1, Scheme::Secondary),
                Cycle::new(DEFAULT_P2, Scheme::Primary),
            ],
            winner: None,
        }
    }
}

impl Tron {
    pub fn with_players(mut self, p1: char, p2: char) -> Self {
        self.players[0].glyph = p1;
        self.players[1].glyph = p2;
        self
    }

    pub fn with_trails(mut self, vertical: char, horizontal: char) -> Self {
        self.vertical = vertical;
        self.horizontal = horizontal;
        self
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn positions(&self) -> [Location; 2] {
        [self.players[0].position, self.players[1].position]
    }

    /// Straight runs leave a vertical or horizontal trail; corners are horizontal.
    fn trail(&self, from: Direction, to: Direction) -> char {
        if from.is_vertical() && to.is_vertical() {
            self.vertical
        } else {
            self.horizontal
        }
    }
}

impl Game for Tron {
    fn title(&self) -> &str {
        TITLE
    }

    fn configure(&mut self, config: &mut EngineConfig) -> Result<(), ConfigError> {
        let [p1, p2] = self.players;
        for (name, glyph) in [
            ("player 1", p1.glyph),
            ("player 2", p2.glyph),
            ("vertical trail", self.vertical),
            ("horizontal trail", self.horizontal),
        ] {
            check_printable(name, glyph)?;
            check_distinct_from_fill(name, glyph, config.glyphs.fill)?;
        }
        if p1.glyph == p2.glyph {
            return Err(ConfigError::Game(format!("both players use {:?}", p1.glyph)));
        }

        config.policy = KeyPolicy::AGGREGATE;
        config.clear_each_tick = false;
        config.keep_score = false;
        config.initial_key = Keystroke::UP | Keystroke::UP2;
        Ok(())
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        let width = ctx.width() as i16;
        let bottom = ctx.height() as i16 - 1;
        let margin = width / 10;

        self.players[0].position = Location::new(bottom, margin);
        self.players[1].position = Location::new(bottom, width - margin);
        for player in &mut self.players {
            player.direction = Direction::Up;
            ctx.paint_char(player.position, player.glyph);
        }
        ctx.set_initial_key(Keystroke::UP | Keystroke::UP2);
        self.winner = None;
        Ok(())
    }

    fn step(&mut self, key: Keystroke, ctx: &mut GameContext<'_>) -> Outcome {
        if key.is_quit() {
            return Outcome::Quit;
        }

        let turns = self.players.map(|p| p.turn(key));
        let next = [
            self.players[0].position.step(turns[0]),
            self.players[1].position.step(turns[1]),
        ];
        let crashed = next.map(|loc| !ctx.is_clear(loc));

        match crashed {
            [true, true] => {
                self.winner = None;
                return Outcome::GameOver;
            }
            _ if next[0] == next[1] => {
                self.winner = None;
                return Outcome::GameOver;
            }
            [true, false] => {
                self.winner = Some(Winner::Two);
                return Outcome::GameOver;
            }
            [false, true] => {
                self.winner = Some(Winner::One);
                return Outcome::GameOver;
            }
            [false, false] => {}
        }

        for (i, turn) in turns.into_iter().enumerate() {
            let trail = self.trail(self.players[i].direction, turn);
            let player = &mut self.players[i];
            ctx.paint_char(player.position, trail);
            player.direction = turn;
            player.position = next[i];
        }
        for player in &self.players {
            ctx.paint_char(player.position, player.glyph);
        }
        Outcome::Continue
    }

    fn over(&mut self, ctx: &mut GameContext<'_>) -> bool {
        let message = match self.winner {
            Some(Winner::One) => P1_WINS,
            Some(Winner::Two) => P2_WINS,
            None => return true,
        };
        ctx.paint_centered_text(ctx.height() as i16 / 2 - 1, message);
        false
    }
}

//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use tui_arcade::core::{Board, EngineConfig};
use tui_arcade::engine::{Engine, Game};
use tui_arcade::input::{KeyFeed, ScriptedKeys};
use tui_arcade::term::Screen;

/// Everything a [`RecordingScreen`] saw.
#[derive(Debug, Default)]
pub struct ScreenLog {
    pub entered: usize,
    pub exited: usize,
    pub reinitialized: usize,
    /// Board rows plus the scoreboard line, one entry per present.
    pub frames: Vec<Vec<String>>,
}

impl ScreenLog {
    pub fn last_frame(&self) -> Option<&Vec<String>> {
        self.frames.last()
    }

    pub fn last_frame_contains(&self, text: &str) -> bool {
        self.last_frame().is_some_and(|f| f.iter().any(|line| line.contains(text)))
    }
}

/// A screen that keeps every frame in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingScreen {
    log: Arc<Mutex<ScreenLog>>,
    fail_enter: bool,
}

impl RecordingScreen {
    pub fn new() -> (Self, Arc<Mutex<ScreenLog>>) {
        let screen = Self::default();
        let log = screen.log.clone();
        (screen, log)
    }

    /// A screen whose `enter` fails, like a missing terminal.
    pub fn failing() -> (Self, Arc<Mutex<ScreenLog>>) {
        let (mut screen, log) = Self::new();
        screen.fail_enter = true;
        (screen, log)
    }
}

impl Screen for RecordingScreen {
    fn enter(&mut self) -> Result<()> {
        if self.fail_enter {
            bail!("not a terminal");
        }
        self.log.lock().unwrap().entered += 1;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.log.lock().unwrap().exited += 1;
        Ok(())
    }

    fn reinitialize(&mut self) -> Result<()> {
        self.log.lock().unwrap().reinitialized += 1;
        Ok(())
    }

    fn present(&mut self, board: &Board, scoreboard: &str) -> Result<()> {
        let mut frame: Vec<String> = board.rows().map(|row| row.iter().collect()).collect();
        frame.push(scoreboard.to_string());
        self.log.lock().unwrap().frames.push(frame);
        Ok(())
    }
}

pub struct Harness<G: Game> {
    pub engine: Engine<G, RecordingScreen>,
    pub feed: KeyFeed,
    pub log: Arc<Mutex<ScreenLog>>,
}

/// An engine on a recording screen and scripted keys.
pub fn harness<G: Game>(config: EngineConfig, game: G) -> Harness<G> {
    let (screen, log) = RecordingScreen::new();
    let (keys, feed) = ScriptedKeys::new();
    let engine = Engine::new(config, game, screen, Box::new(keys)).with_seed(7);
    Harness { engine, feed, log }
}

/// Poll `cond` until it holds or two seconds pass.
pub fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

//! The lifecycle state machine.
//!
//! ```text
//! Idle --start--> AwaitingPlay --new_game--> Running --tick*--> (GameOver | Quit)
//!                      ^                                              |
//!                      +------------------game_over-------------------+
//! any --stop--> Stopped
//! ```
//!
//! The engine owns the game, the screen, the board and the input thread. All
//! game hooks run on the caller's thread; the input thread only touches the
//! shared keystroke state.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::{compose_scoreboard, Board, EngineConfig};
use crate::error::EngineError;
use crate::game::{Game, GameContext, Session};
use crate::input::{is_quit_key, CrosstermKeys, InputThread, KeySource, RawKey, SharedInput, POLL_TIMEOUT};
use crate::signal::SignalGuard;
use crate::term::{RefreshGate, Screen, TerminalRenderer};
use crate::types::{
    quit_message, tick_delay_ms, Outcome, EXIT_MESSAGE, GAME_OVER_MESSAGE, PLAY_MESSAGE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingPlay,
    Running,
    GameOver,
    Stopped,
}

pub struct Engine<G: Game, S: Screen> {
    config: EngineConfig,
    game: G,
    screen: S,
    phase: Phase,

    shared: Arc<SharedInput>,
    session: Session,
    rng: StdRng,
    gate: RefreshGate,

    board: Option<Board>,
    keys: Option<Box<dyn KeySource>>,
    input: Option<InputThread>,
    prompt: Option<Receiver<RawKey>>,
    handle_signals: bool,
    signals: Option<SignalGuard>,
}

impl<G: Game> Engine<G, TerminalRenderer> {
    /// An engine drawing to stdout and reading keys from the terminal.
    pub fn terminal(config: EngineConfig, game: G) -> Self {
        Self::new(config, game, TerminalRenderer::new(), Box::new(CrosstermKeys::new()))
    }
}

impl<G: Game, S: Screen> Engine<G, S> {
    pub fn new(config: EngineConfig, game: G, screen: S, keys: Box<dyn KeySource>) -> Self {
        let session = Session::new(&config);
        let gate = RefreshGate::new(config.refresh, config.speed);
        Self {
            config,
            game,
            screen,
            phase: Phase::Idle,
            shared: Arc::new(SharedInput::new()),
            session,
            rng: StdRng::from_entropy(),
            gate,
            board: None,
            keys: Some(keys),
            input: None,
            prompt: None,
            handle_signals: false,
            signals: None,
        }
    }

    /// Seed the random source games draw locations from.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Route SIGINT/SIGTERM to the interrupt flag while the engine runs.
    pub fn with_signal_handling(mut self) -> Self {
        self.handle_signals = true;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The board, once `start` has allocated it.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn speed(&self) -> u8 {
        self.session.speed
    }

    pub fn shared(&self) -> &Arc<SharedInput> {
        &self.shared
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Validate, take over the terminal, spawn the input thread and
    /// initialize the game.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.expect_phase("start", Phase::Idle)?;

        if self.config.title.is_empty() {
            self.config.title = self.game.title().to_owned();
        }
        self.game.configure(&mut self.config)?;
        self.config.validate()?;

        let keys = self.keys.take().ok_or(EngineError::InvalidPhase {
            op: "start",
            phase: self.phase,
        })?;

        if let Err(e) = self.screen.enter() {
            self.keys = Some(keys);
            return Err(EngineError::Terminal(e));
        }

        let cfg = &self.config;
        self.board = Some(Board::new(cfg.width, cfg.height, &cfg.title, cfg.glyphs));
        self.session = Session::new(cfg);
        self.gate = RefreshGate::new(cfg.refresh, cfg.speed);

        let (tx, rx) = crossbeam_channel::unbounded();
        match InputThread::spawn(keys, self.shared.clone(), cfg.policy, tx) {
            Ok(thread) => {
                self.input = Some(thread);
                self.prompt = Some(rx);
            }
            Err(e) => {
                self.release_terminal();
                self.board = None;
                return Err(EngineError::Spawn(e));
            }
        }

        if self.handle_signals {
            match SignalGuard::install(self.shared.clone()) {
                Ok(guard) => self.signals = Some(guard),
                Err(e) => tracing::warn!(error = %e, "signal handling unavailable"),
            }
        }

        let initialized = match self.board.as_mut() {
            Some(board) => {
                let mut ctx = GameContext::new(board, &mut self.session, &mut self.rng, &self.shared);
                self.game.initialize(&mut ctx)
            }
            None => Ok(()),
        };
        if let Err(e) = initialized {
            self.shutdown();
            return Err(EngineError::Initialize(e));
        }

        tracing::info!(
            title = %self.config.title,
            width = self.config.width,
            height = self.config.height,
            speed = self.config.speed,
            "engine started"
        );
        self.phase = Phase::AwaitingPlay;
        Ok(())
    }

    /// Show the play prompt and wait for a key.
    pub fn await_play(&mut self) -> Result<Outcome, EngineError> {
        self.expect_phase("await_play", Phase::AwaitingPlay)?;
        if self.shared.is_killed() {
            return Ok(Outcome::Quit);
        }

        let line = self.banner_line() + 1;
        if let Some(board) = self.board.as_mut() {
            board.paint_centered_text(line, &quit_message());
            board.paint_centered_text(line + 1, PLAY_MESSAGE);
        }
        self.render();

        match self.read_prompt_key() {
            Some(key) if !is_quit_key(key) => Ok(Outcome::Continue),
            _ => {
                self.shared.request_quit();
                Ok(Outcome::Quit)
            }
        }
    }

    /// Reset everything for a fresh game and start running.
    pub fn new_game(&mut self) -> Result<Outcome, EngineError> {
        self.expect_phase("new_game", Phase::AwaitingPlay)?;
        if self.shared.is_killed() {
            return Ok(Outcome::Quit);
        }

        self.session.score = 0;
        self.shared.clear_quit();
        self.gate.reset();

        let Some(board) = self.board.as_mut() else {
            return Err(EngineError::InvalidPhase {
                op: "new_game",
                phase: self.phase,
            });
        };
        board.clear_interior();
        let mut ctx = GameContext::new(board, &mut self.session, &mut self.rng, &self.shared);
        if let Err(e) = self.game.reset(&mut ctx) {
            tracing::warn!(error = %e, "game reset failed");
            return Ok(Outcome::Quit);
        }

        self.shared.set_pending(self.session.initial_key);
        self.shared.set_running(true);
        self.phase = Phase::Running;
        tracing::info!(score = self.session.score, "new game");
        self.render();
        Ok(Outcome::Continue)
    }

    /// One step of play: clear, move, render, sleep.
    pub fn tick(&mut self) -> Result<Outcome, EngineError> {
        self.expect_phase("tick", Phase::Running)?;
        if self.shared.is_quitting() || self.shared.is_killed() {
            self.shared.set_running(false);
            return Ok(Outcome::Quit);
        }

        let Some(board) = self.board.as_mut() else {
            return Err(EngineError::InvalidPhase {
                op: "tick",
                phase: self.phase,
            });
        };
        if self.config.clear_each_tick {
            board.clear_interior();
        }
        let key = self.shared.next_key();
        let mut ctx = GameContext::new(board, &mut self.session, &mut self.rng, &self.shared);
        let outcome = self.game.step(key, &mut ctx);

        if outcome != Outcome::Quit {
            self.render();
            thread::sleep(Duration::from_millis(tick_delay_ms(self.session.speed)));
        }
        if outcome != Outcome::Continue {
            self.shared.set_running(false);
        }
        Ok(outcome)
    }

    /// Run the game's epilogue and ask whether to play again.
    ///
    /// A killed engine moves to `GameOver` and returns `Quit` with no epilogue
    /// or prompt.
    pub fn game_over(&mut self) -> Result<Outcome, EngineError> {
        self.expect_phase("game_over", Phase::Running)?;
        self.shared.set_running(false);
        self.phase = Phase::GameOver;
        if self.shared.is_killed() {
            return Ok(Outcome::Quit);
        }

        let line = self.banner_line();
        if let Some(board) = self.board.as_mut() {
            let mut ctx = GameContext::new(board, &mut self.session, &mut self.rng, &self.shared);
            if self.game.over(&mut ctx) {
                board.paint_centered_text(line, GAME_OVER_MESSAGE);
            }
            board.paint_centered_text(line + 1, &quit_message());
            board.paint_centered_text(line + 2, PLAY_MESSAGE);
        }
        self.render();

        match self.read_prompt_key() {
            Some(key) if !is_quit_key(key) => {
                self.shared.clear_quit();
                self.phase = Phase::AwaitingPlay;
                Ok(Outcome::Continue)
            }
            _ => {
                self.shared.request_quit();
                Ok(Outcome::Quit)
            }
        }
    }

    /// Stop the input thread, show the exit prompt and restore the terminal.
    ///
    /// Safe to call in any phase and more than once.
    pub fn stop(&mut self) {
        self.finish(true);
    }

    /// Play until the player quits, then stop.
    pub fn run(&mut self) -> Result<(), EngineError> {
        if self.phase == Phase::Idle {
            self.start()?;
        }

        if self.await_play()? == Outcome::Continue {
            while self.new_game()? == Outcome::Continue {
                // A quit during play still lands on the replay prompt.
                while self.tick()? == Outcome::Continue {}
                if self.game_over()? != Outcome::Continue {
                    break;
                }
            }
        }

        self.stop();
        Ok(())
    }

    fn finish(&mut self, wait_for_key: bool) {
        if self.phase == Phase::Stopped {
            return;
        }
        if self.phase == Phase::Idle {
            self.phase = Phase::Stopped;
            return;
        }

        self.shared.set_running(false);
        self.shared.request_quit();
        self.shared.kill();
        let source = self.input.take().and_then(InputThread::join);
        self.signals = None;

        if let Some(board) = self.board.as_mut() {
            board.clear_interior();
        }
        self.game.stop();
        let line = self.banner_line();
        if let Some(board) = self.board.as_mut() {
            board.paint_centered_text(line, EXIT_MESSAGE);
        }
        self.render();

        if wait_for_key && !self.shared.is_interrupted() {
            self.wait_exit_key(source);
        }

        self.release_terminal();
        self.prompt = None;
        self.phase = Phase::Stopped;
        tracing::info!("engine stopped");
    }

    fn wait_exit_key(&mut self, source: Option<Box<dyn KeySource>>) {
        if let Some(rx) = &self.prompt {
            if rx.try_recv().is_ok() {
                return;
            }
        }
        let Some(mut source) = source else {
            return;
        };
        while !self.shared.is_interrupted() {
            match source.poll_key(POLL_TIMEOUT) {
                Ok(Some(_)) => return,
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "key source failed at exit");
                    return;
                }
            }
        }
    }

    /// Release everything without waiting on the player.
    fn shutdown(&mut self) {
        self.shared.kill();
        if let Some(thread) = self.input.take() {
            thread.join();
        }
        self.signals = None;
        self.prompt = None;
        self.release_terminal();
        self.phase = Phase::Stopped;
    }

    fn release_terminal(&mut self) {
        if let Err(e) = self.screen.exit() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }

    /// Block until the input thread forwards a key, then swallow whatever
    /// else was buffered with it.
    fn read_prompt_key(&self) -> Option<RawKey> {
        let rx = self.prompt.as_ref()?;
        let key = loop {
            if self.shared.is_killed() {
                return None;
            }
            match rx.recv_timeout(POLL_TIMEOUT) {
                Ok(key) => break key,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        };
        while rx.recv_timeout(POLL_TIMEOUT).is_ok() {}
        Some(key)
    }

    fn render(&mut self) {
        let Some(board) = self.board.as_ref() else {
            return;
        };
        self.gate.set_threshold(self.config.refresh, self.session.speed);
        if self.gate.should_reinitialize(self.shared.take_refresh()) {
            tracing::debug!("reinitializing terminal");
            if let Err(e) = self.screen.reinitialize() {
                tracing::warn!(error = %e, "terminal reinitialization failed");
            }
        }
        let scoreboard = compose_scoreboard(
            self.config.keep_score,
            self.session.score,
            self.config.width,
            self.config.height,
            self.session.speed,
        );
        if let Err(e) = self.screen.present(board, &scoreboard) {
            tracing::warn!(error = %e, "present failed");
        }
    }

    fn banner_line(&self) -> i16 {
        self.config.height as i16 / 2 - 1
    }

    fn expect_phase(&self, op: &'static str, phase: Phase) -> Result<(), EngineError> {
        if self.phase != phase {
            return Err(EngineError::InvalidPhase { op, phase: self.phase });
        }
        Ok(())
    }
}

impl<G: Game, S: Screen> Drop for Engine<G, S> {
    fn drop(&mut self) {
        self.finish(false);
    }
}

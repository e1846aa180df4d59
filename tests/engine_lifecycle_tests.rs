//! Engine lifecycle: start, play, game over, replay, stop.

mod common;

use std::thread;
use std::time::Duration;

use anyhow::anyhow;

use common::{harness, wait_for, RecordingScreen};
use tui_arcade::core::{ConfigError, EngineConfig, RefreshInterval};
use tui_arcade::engine::{Engine, EngineError, Game, GameContext, Phase};
use tui_arcade::input::ScriptedKeys;
use tui_arcade::types::{Keystroke, Location, Outcome, EXIT_MESSAGE, GAME_OVER_MESSAGE, PLAY_MESSAGE};

/// Drops one row per DOWN tick; falling off the board ends the game.
#[derive(Default)]
struct Faller {
    at: Location,
    keep_trail: bool,
    obstacle: Option<Location>,
}

impl Game for Faller {
    fn title(&self) -> &str {
        " FALL "
    }

    fn configure(&mut self, config: &mut EngineConfig) -> Result<(), ConfigError> {
        config.initial_key = Keystroke::DOWN;
        config.clear_each_tick = !self.keep_trail;
        Ok(())
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        self.at = Location::new(0, 5);
        if let Some(obstacle) = self.obstacle {
            ctx.paint_char(obstacle, '#');
        }
        ctx.paint_char(self.at, '@');
        Ok(())
    }

    fn step(&mut self, key: Keystroke, ctx: &mut GameContext<'_>) -> Outcome {
        if key.is_quit() {
            return Outcome::Quit;
        }
        let mut next = self.at;
        if key.contains(Keystroke::DOWN) {
            next.row += 1;
        }
        if next != self.at && !ctx.is_clear(next) {
            return Outcome::GameOver;
        }
        self.at = next;
        ctx.paint_char(self.at, '@');
        Outcome::Continue
    }
}

/// Never ends on its own.
struct Idler;

impl Game for Idler {
    fn title(&self) -> &str {
        " IDLE "
    }

    fn step(&mut self, key: Keystroke, _ctx: &mut GameContext<'_>) -> Outcome {
        if key.is_quit() {
            Outcome::Quit
        } else {
            Outcome::Continue
        }
    }
}

struct Broken;

impl Game for Broken {
    fn title(&self) -> &str {
        " BROKEN "
    }

    fn initialize(&mut self, _ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        Err(anyhow!("assets missing"))
    }

    fn step(&mut self, _key: Keystroke, _ctx: &mut GameContext<'_>) -> Outcome {
        Outcome::GameOver
    }
}

fn count_in_board(frame: &[String], glyph: char) -> usize {
    // Last line is the scoreboard.
    frame[..frame.len() - 1].iter().map(|l| l.chars().filter(|&c| c == glyph).count()).sum()
}

#[test]
fn falling_off_a_default_board_is_game_over_and_replay_works() {
    let mut h = harness(EngineConfig::default(), Faller::default());
    h.engine.start().unwrap();
    assert_eq!(h.engine.phase(), Phase::AwaitingPlay);
    assert_eq!(h.log.lock().unwrap().entered, 1);

    h.feed.char(' ');
    assert_eq!(h.engine.await_play().unwrap(), Outcome::Continue);
    assert_eq!(h.engine.new_game().unwrap(), Outcome::Continue);
    assert_eq!(h.engine.phase(), Phase::Running);
    assert_eq!(h.engine.score(), 0);
    assert_eq!(h.engine.shared().pending(), Keystroke::DOWN);

    let presented = h.log.lock().unwrap().frames.len();
    let mut ticks = 0;
    let outcome = loop {
        ticks += 1;
        let outcome = h.engine.tick().unwrap();
        if outcome != Outcome::Continue {
            break outcome;
        }
    };
    assert_eq!(outcome, Outcome::GameOver);
    assert_eq!(ticks, 15);

    {
        let log = h.log.lock().unwrap();
        let (last, played) = log.frames[presented..].split_last().unwrap();
        for frame in played {
            assert_eq!(count_in_board(frame, '@'), 1);
        }
        // The losing tick cleared the board and painted nothing.
        assert_eq!(count_in_board(last, '@'), 0);
        assert_eq!(last.len(), 15 + 4);
        assert_eq!(last[18].chars().count(), 42);
        assert!(last[18].starts_with(" SCORE: 0 "));
    }

    h.feed.char('x');
    assert_eq!(h.engine.game_over().unwrap(), Outcome::Continue);
    assert_eq!(h.engine.phase(), Phase::AwaitingPlay);
    {
        let log = h.log.lock().unwrap();
        assert!(log.last_frame_contains(GAME_OVER_MESSAGE));
        assert!(log.last_frame_contains(" PRESS 'q' TO QUIT "));
        assert!(log.last_frame_contains(PLAY_MESSAGE));
    }

    assert_eq!(h.engine.new_game().unwrap(), Outcome::Continue);
    assert_eq!(h.engine.phase(), Phase::Running);
    assert_eq!(h.engine.shared().pending(), Keystroke::DOWN);
    let board = h.engine.board().unwrap();
    assert_eq!(board.read_char(Location::new(0, 5)), Some('@'));
    assert!(board.is_clear(Location::new(7, 5)));

    h.engine.shared().interrupt();
    h.engine.stop();
    assert_eq!(h.engine.phase(), Phase::Stopped);
    let log = h.log.lock().unwrap();
    assert_eq!(log.exited, 1);
    assert!(log.last_frame_contains(EXIT_MESSAGE));
}

#[test]
fn entering_a_prepainted_cell_is_game_over() {
    let game = Faller {
        keep_trail: true,
        obstacle: Some(Location::new(5, 5)),
        ..Faller::default()
    };
    let mut h = harness(EngineConfig::default().with_speed(10), game);
    h.engine.start().unwrap();
    h.feed.char(' ');
    assert_eq!(h.engine.await_play().unwrap(), Outcome::Continue);
    h.engine.new_game().unwrap();

    let outcomes: Vec<Outcome> = (0..5).map(|_| h.engine.tick().unwrap()).collect();
    assert_eq!(&outcomes[..4], &[Outcome::Continue; 4]);
    assert_eq!(outcomes[4], Outcome::GameOver);
    assert_eq!(h.engine.game().at, Location::new(4, 5));

    h.engine.shared().interrupt();
    h.engine.stop();
}

#[test]
fn quit_during_play_lands_on_the_prompt_and_q_quits() {
    let mut h = harness(EngineConfig::default().with_speed(10), Idler);
    h.engine.start().unwrap();
    h.feed.char(' ');
    h.engine.await_play().unwrap();
    h.engine.new_game().unwrap();
    assert_eq!(h.engine.tick().unwrap(), Outcome::Continue);

    h.feed.char('q');
    assert!(wait_for(|| h.engine.shared().is_quitting()));
    assert_eq!(h.engine.tick().unwrap(), Outcome::Quit);

    h.feed.char('q');
    assert_eq!(h.engine.game_over().unwrap(), Outcome::Quit);
    assert_eq!(h.engine.phase(), Phase::GameOver);

    h.feed.char(' ');
    h.engine.stop();
    assert_eq!(h.engine.phase(), Phase::Stopped);
}

#[test]
fn quit_at_the_first_prompt() {
    let mut h = harness(EngineConfig::default(), Idler);
    h.engine.start().unwrap();
    h.feed.char('q');
    assert_eq!(h.engine.await_play().unwrap(), Outcome::Quit);
    assert!(h.engine.shared().is_quitting());
}

#[test]
fn interrupt_skips_the_exit_prompt() {
    let mut h = harness(EngineConfig::default().with_speed(10), Idler);
    h.engine.start().unwrap();
    h.feed.char(' ');
    h.engine.await_play().unwrap();
    h.engine.new_game().unwrap();

    h.engine.shared().interrupt();
    assert_eq!(h.engine.tick().unwrap(), Outcome::Quit);
    let presented = h.log.lock().unwrap().frames.len();
    assert_eq!(h.engine.game_over().unwrap(), Outcome::Quit);
    // Killed: no epilogue and no replay prompt, but the phase still advances.
    assert_eq!(h.engine.phase(), Phase::GameOver);
    assert_eq!(h.log.lock().unwrap().frames.len(), presented);
    h.engine.stop();
    assert_eq!(h.engine.phase(), Phase::Stopped);
    assert_eq!(h.log.lock().unwrap().exited, 1);
    assert_eq!(h.engine.shared().pending(), Keystroke::QUIT);
}

#[test]
fn invalid_config_acquires_nothing() {
    let mut h = harness(EngineConfig::default().with_size(5, 15), Idler);
    let err = h.engine.start().unwrap_err();
    assert!(matches!(err, EngineError::Config(ConfigError::Width(5))), "{err}");
    assert_eq!(h.engine.phase(), Phase::Idle);
    assert_eq!(h.log.lock().unwrap().entered, 0);
    assert!(!h.engine.shared().is_killed());
}

#[test]
fn terminal_failure_is_reported() {
    let (screen, log) = RecordingScreen::failing();
    let (keys, _feed) = ScriptedKeys::new();
    let mut engine = Engine::new(EngineConfig::default(), Idler, screen, Box::new(keys));
    assert!(matches!(engine.start(), Err(EngineError::Terminal(_))));
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(log.lock().unwrap().exited, 0);
}

#[test]
fn failed_initialize_releases_everything() {
    let mut h = harness(EngineConfig::default(), Broken);
    let err = h.engine.start().unwrap_err();
    assert!(matches!(err, EngineError::Initialize(_)));
    assert!(err.to_string().contains("assets missing"));
    assert_eq!(h.engine.phase(), Phase::Stopped);
    assert!(h.engine.shared().is_killed());
    assert_eq!(h.log.lock().unwrap().exited, 1);
}

#[test]
fn out_of_order_calls_are_rejected() {
    let mut h = harness(EngineConfig::default(), Idler);
    assert!(matches!(
        h.engine.tick(),
        Err(EngineError::InvalidPhase { op: "tick", phase: Phase::Idle })
    ));
    h.engine.start().unwrap();
    assert!(matches!(h.engine.start(), Err(EngineError::InvalidPhase { .. })));
    assert!(matches!(h.engine.game_over(), Err(EngineError::InvalidPhase { .. })));
}

#[test]
fn dropping_the_engine_restores_the_terminal() {
    let h = harness(EngineConfig::default(), Idler);
    let log = h.log.clone();
    let mut engine = h.engine;
    engine.start().unwrap();
    drop(engine);
    assert_eq!(log.lock().unwrap().exited, 1);
}

#[test]
fn title_defaults_to_the_game_title() {
    let mut h = harness(EngineConfig::default(), Idler);
    h.engine.start().unwrap();
    assert_eq!(h.engine.config().title, " IDLE ");
    let title: String = h.engine.board().unwrap().rows().next().unwrap().iter().collect();
    assert!(title.contains(" IDLE "));
}

#[test]
fn periodic_and_manual_refresh() {
    let config = EngineConfig::default().with_speed(10).with_refresh(RefreshInterval::Frames(2));
    let mut h = harness(config, Idler);
    h.engine.start().unwrap();
    h.feed.char(' ');
    h.engine.await_play().unwrap();
    h.engine.new_game().unwrap();
    assert_eq!(h.log.lock().unwrap().reinitialized, 0);

    h.engine.tick().unwrap();
    assert_eq!(h.log.lock().unwrap().reinitialized, 0);
    h.engine.tick().unwrap();
    assert_eq!(h.log.lock().unwrap().reinitialized, 1);

    h.feed.char('r');
    thread::sleep(Duration::from_millis(300));
    h.engine.tick().unwrap();
    assert_eq!(h.log.lock().unwrap().reinitialized, 2);

    h.engine.shared().interrupt();
    h.engine.stop();
}

#[test]
fn run_drives_a_whole_session() {
    let mut h = harness(EngineConfig::default().with_size(23, 6).with_speed(10), Faller::default());
    let log = h.log.clone();
    let feed = h.feed.clone();

    let player = thread::spawn(move || {
        let has = |text: &str| log.lock().unwrap().frames.iter().any(|f| f.iter().any(|l| l.contains(text)));
        assert!(wait_for(|| has(PLAY_MESSAGE)));
        feed.char(' ');
        assert!(wait_for(|| has(GAME_OVER_MESSAGE)));
        feed.char('q');
        assert!(wait_for(|| has(EXIT_MESSAGE)));
        feed.char(' ');
    });

    h.engine.run().unwrap();
    player.join().unwrap();
    assert_eq!(h.engine.phase(), Phase::Stopped);
}

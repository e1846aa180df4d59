//! Terminal arcade runner (default binary).
//!
//! `tui-arcade <GAME> [options]` picks a game, builds the engine configuration
//! from the flags and plays until the player quits.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tui_arcade::core::{EngineConfig, RefreshInterval};
use tui_arcade::engine::{Engine, Game};
use tui_arcade::games::{chopper, snake, tron, Chopper, Snake, Tron};
use tui_arcade::term::install_panic_hook;
use tui_arcade::types::{Glyphs, DEFAULT_HEIGHT, DEFAULT_SPEED, DEFAULT_WIDTH};

#[derive(Parser, Debug)]
#[command(name = "tui-arcade", version)]
#[command(about = "Character-grid arcade games in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    game: GameCommand,
}

#[derive(Subcommand, Debug)]
enum GameCommand {
    /// Fly through a scrolling cave
    Chopper {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, default_value_t = chopper::DEFAULT_CHOPPER)]
        chopper: char,
        #[arg(long, default_value_t = chopper::DEFAULT_OBSTACLE)]
        obstacle: char,
    },
    /// Eat and grow
    Snake {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, default_value_t = snake::DEFAULT_HEAD)]
        head: char,
        #[arg(long, default_value_t = snake::DEFAULT_BODY)]
        body: char,
        #[arg(long, default_value_t = snake::DEFAULT_FOOD)]
        food: char,
        /// Starting length, below the board width
        #[arg(long, default_value_t = snake::DEFAULT_LENGTH)]
        length: u16,
    },
    /// Two players: w/s/d/a against the arrow keys
    Tron {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, default_value_t = tron::DEFAULT_P1)]
        p1: char,
        #[arg(long, default_value_t = tron::DEFAULT_P2)]
        p2: char,
        #[arg(long, default_value_t = tron::DEFAULT_VERTICAL_TRAIL)]
        vtrail: char,
        #[arg(long, default_value_t = tron::DEFAULT_HORIZONTAL_TRAIL)]
        htrail: char,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Board width in cells (23-128)
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: u16,

    /// Board height in cells (6-48)
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    height: u16,

    /// Speed class (1-10)
    #[arg(short, long, default_value_t = DEFAULT_SPEED)]
    speed: u8,

    /// Don't keep score
    #[arg(long, default_value_t = false)]
    freeplay: bool,

    /// Fill around the title
    #[arg(long, default_value_t = ' ')]
    title_char: char,

    #[arg(long, default_value_t = '+')]
    corner: char,

    #[arg(long, default_value_t = '-')]
    hborder: char,

    #[arg(long, default_value_t = '|')]
    vborder: char,

    /// Empty board cell
    #[arg(long, default_value_t = ' ')]
    board: char,

    /// Redraw the whole terminal every N frames (0 disables; default: every `speed` frames)
    #[arg(long, value_name = "N")]
    refresh: Option<u32>,

    /// Write logs to FILE (filter with RUST_LOG)
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

impl CommonArgs {
    fn config(&self) -> EngineConfig {
        let glyphs = Glyphs {
            title: self.title_char,
            corner: self.corner,
            horizontal: self.hborder,
            vertical: self.vborder,
            fill: self.board,
        };
        let config = EngineConfig::default()
            .with_size(self.width, self.height)
            .with_speed(self.speed)
            .with_keep_score(!self.freeplay)
            .with_glyphs(glyphs);
        match self.refresh {
            Some(frames) => config.with_refresh(RefreshInterval::from_frames(frames)),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (common, game): (CommonArgs, Box<dyn Game>) = match cli.game {
        GameCommand::Chopper {
            common,
            chopper,
            obstacle,
        } => (common, Box::new(Chopper::new(chopper, obstacle))),
        GameCommand::Snake {
            common,
            head,
            body,
            food,
            length,
        } => (
            common,
            Box::new(Snake::default().with_glyphs(head, body, food).with_length(length)),
        ),
        GameCommand::Tron {
            common,
            p1,
            p2,
            vtrail,
            htrail,
        } => (
            common,
            Box::new(Tron::default().with_players(p1, p2).with_trails(vtrail, htrail)),
        ),
    };

    if let Some(path) = &common.log {
        init_logging(path)?;
    }

    install_panic_hook();
    let mut engine = Engine::terminal(common.config(), game).with_signal_handling();
    engine.run()?;
    tracing::info!(score = engine.score(), "bye");
    Ok(())
}

/// Stdout is the game screen, so logs only ever go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

//! Print what the arcade makes of each key press.
//!
//! Useful when a terminal sends something unexpected for the arrow keys.
//! Press `q` or Ctrl-C to exit. With `--replay FILE` the keys are decoded from
//! a recorded raw byte stream instead of the live terminal.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal;

use tui_arcade::input::{classify, CrosstermKeys, KeyAction, KeySource, ReplayKeys, POLL_TIMEOUT};

#[derive(Parser, Debug)]
#[command(name = "key-probe", about = "Show how key presses are classified")]
struct Cli {
    /// Decode a recorded byte stream instead of reading the terminal
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.replay {
        Some(path) => replay(&path),
        None => live(),
    }
}

fn live() -> Result<()> {
    terminal::enable_raw_mode()?;
    let result = probe(&mut CrosstermKeys::new(), |_| false);
    // Always try to restore terminal state.
    let _ = terminal::disable_raw_mode();
    result
}

fn replay(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut keys = ReplayKeys::from_reader(file)?;
    probe(&mut keys, |keys| keys.is_exhausted())
}

fn probe<K: KeySource>(keys: &mut K, done: impl Fn(&K) -> bool) -> Result<()> {
    let mut out = io::stdout();
    write!(out, "press keys, 'q' to quit\r\n")?;
    out.flush()?;

    while !done(keys) {
        let Some(key) = keys.poll_key(POLL_TIMEOUT)? else {
            continue;
        };
        let action = classify(key);
        write!(out, "{key:?} -> {action:?}\r\n")?;
        out.flush()?;
        if matches!(action, KeyAction::Quit | KeyAction::Interrupt) {
            return Ok(());
        }
    }
    Ok(())
}

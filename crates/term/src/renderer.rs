//! TerminalRenderer: flushes frames to a real terminal.
//!
//! Frames are diffed against the previous one and only changed runs are
//! rewritten. A reinitialization throws the previous frame away, tears the
//! alternate screen down and back up, and redraws everything.

use std::io::{self, Write};
use std::sync::OnceLock;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use crate::core::Board;
use crate::frame::Frame;
use crate::screen::Screen;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    raw_mode: bool,
    last: Option<Frame>,
    next: Frame,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    /// Render to stdout, switching the terminal into raw mode on `enter`.
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            raw_mode: true,
            last: None,
            next: Frame::new(0, 0),
            buf: Vec::with_capacity(16 * 1024),
        }
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Render into any writer. Terminal modes are left alone.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            raw_mode: false,
            last: None,
            next: Frame::new(0, 0),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Force the next present to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    fn draw(&mut self) -> Result<()> {
        self.buf.clear();
        match self.last.take() {
            Some(mut prev) if prev.width() == self.next.width() && prev.height() == self.next.height() => {
                encode_diff_into(&prev, &self.next, &mut self.buf)?;
                self.flush_buf()?;
                // The presented frame becomes the baseline; the old one is reused for the next compose.
                std::mem::swap(&mut prev, &mut self.next);
                self.last = Some(prev);
            }
            _ => {
                encode_full_into(&self.next, &mut self.buf)?;
                self.flush_buf()?;
                self.last = Some(self.next.clone());
            }
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Screen for TerminalRenderer<W> {
    fn enter(&mut self) -> Result<()> {
        if self.raw_mode {
            terminal::enable_raw_mode()?;
        }
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.invalidate();
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        encode_restore_into(&mut self.buf)?;
        self.flush_buf()?;
        if self.raw_mode {
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn reinitialize(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.invalidate();
        tracing::trace!("terminal reinitialized");
        Ok(())
    }

    fn present(&mut self, board: &Board, scoreboard: &str) -> Result<()> {
        self.next.compose(board, scoreboard);
        self.draw()
    }
}

/// Encode the sequence that hands the terminal back: attributes reset, line
/// wrap and cursor back on, alternate screen left.
pub fn encode_restore_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(terminal::EnableLineWrap)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Best-effort restore of stdout, for paths where no renderer is left to drop.
pub fn restore_terminal() {
    let mut buf = Vec::new();
    if encode_restore_into(&mut buf).is_ok() {
        let mut out = io::stdout();
        let _ = out.write_all(&buf);
        let _ = out.flush();
    }
    let _ = terminal::disable_raw_mode();
}

/// Restore the terminal before the default panic output.
///
/// Release builds abort on panic, so no destructor gets to do it. Installing
/// more than once is a no-op.
pub fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));
    });
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    for y in 0..frame.height() {
        let line: String = frame.row(y).iter().collect();
        out.queue(Print(line))?;
        if y + 1 < frame.height() {
            out.queue(Print("\r\n"))?;
        }
    }
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
pub fn encode_diff_into(prev: &Frame, next: &Frame, out: &mut Vec<u8>) -> Result<()> {
    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        let run: String = next.row(y)[x as usize..(x + len) as usize].iter().collect();
        out.queue(Print(run))?;
        Ok(())
    })
}

fn for_each_changed_run(prev: &Frame, next: &Frame, mut f: impl FnMut(u16, u16, u16) -> Result<()>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        // Different geometry: every row is one dirty run.
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for y in 0..next.height() {
        let a = prev.row(y);
        let b = next.row(y);
        let mut x = 0;
        while x < w {
            if a[x as usize] == b[x as usize] {
                x += 1;
                continue;
            }
            let start = x;
            x += 1;
            while x < w && a[x as usize] != b[x as usize] {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }
    Ok(())
}

//! Key mapping from terminal events to arcade keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Direction, Keystroke, Scheme, QUIT_KEY, REFRESH_KEY};

/// A key as delivered by a [`KeySource`](crate::source::KeySource), before any
/// binding is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKey {
    /// A decoded arrow sequence.
    Arrow(Direction),
    Char(char),
    /// Ctrl-C. Raw mode delivers it as a key rather than a signal.
    Interrupt,
}

/// What a raw key means to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Keystroke),
    Refresh,
    Quit,
    Interrupt,
    Ignored,
}

/// Map a crossterm key event. Releases and repeats are dropped.
pub fn map_key_event(key: KeyEvent) -> Option<RawKey> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')) {
        return Some(RawKey::Interrupt);
    }
    match key.code {
        KeyCode::Up => Some(RawKey::Arrow(Direction::Up)),
        KeyCode::Down => Some(RawKey::Arrow(Direction::Down)),
        KeyCode::Right => Some(RawKey::Arrow(Direction::Right)),
        KeyCode::Left => Some(RawKey::Arrow(Direction::Left)),
        KeyCode::Enter => Some(RawKey::Char('\n')),
        KeyCode::Char(c) => Some(RawKey::Char(c)),
        _ => None,
    }
}

/// Apply the fixed bindings to a raw key.
pub fn classify(key: RawKey) -> KeyAction {
    match key {
        RawKey::Arrow(dir) => KeyAction::Steer(Keystroke::from_direction(dir, Scheme::Primary)),
        RawKey::Interrupt => KeyAction::Interrupt,
        RawKey::Char(c) => match c.to_ascii_lowercase() {
            'w' => KeyAction::Steer(Keystroke::UP2),
            's' => KeyAction::Steer(Keystroke::DOWN2),
            'd' => KeyAction::Steer(Keystroke::RIGHT2),
            'a' => KeyAction::Steer(Keystroke::LEFT2),
            c if c == REFRESH_KEY => KeyAction::Refresh,
            c if c == QUIT_KEY => KeyAction::Quit,
            _ => KeyAction::Ignored,
        },
    }
}

/// Check if a prompt answer means "quit".
pub fn is_quit_key(key: RawKey) -> bool {
    matches!(classify(key), KeyAction::Quit | KeyAction::Interrupt)
}

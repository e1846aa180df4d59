//! Key sources polled by the input thread.

use std::io::{self, Read};
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use crossterm::event::{self, Event};

use crate::decode::{decode_all, decode_next, Decoded};
use crate::map::{map_key_event, RawKey};

/// Something that yields keys, one at a time, with a timeout.
pub trait KeySource: Send {
    /// Wait at most `timeout` for a key.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<RawKey>>;
}

/// Keys from the controlling terminal via crossterm.
///
/// Crossterm already turns escape sequences into arrow key codes.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl CrosstermKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for CrosstermKeys {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<RawKey>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(map_key_event(key)),
            _ => Ok(None),
        }
    }
}

/// Keys fed programmatically, e.g. by tests or a replay.
#[derive(Debug)]
pub struct ScriptedKeys {
    rx: Receiver<RawKey>,
}

/// Feeding end of a [`ScriptedKeys`] source.
#[derive(Debug, Clone)]
pub struct KeyFeed {
    tx: Sender<RawKey>,
}

impl ScriptedKeys {
    pub fn new() -> (Self, KeyFeed) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { rx }, KeyFeed { tx })
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<RawKey>> {
        match self.rx.recv_timeout(timeout) {
            Ok(key) => Ok(Some(key)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                // Nobody can feed us anymore; behave like an idle keyboard.
                std::thread::sleep(timeout);
                Ok(None)
            }
        }
    }
}

impl KeyFeed {
    pub fn key(&self, key: RawKey) {
        let _ = self.tx.send(key);
    }

    pub fn char(&self, c: char) {
        self.key(RawKey::Char(c));
    }

    /// Feed raw terminal bytes, decoding arrow sequences.
    pub fn bytes(&self, bytes: &[u8]) {
        for key in decode_all(bytes) {
            self.key(key);
        }
    }
}

/// Keys decoded from a recorded terminal byte stream, such as a raw-mode
/// capture of a session.
///
/// Arrow sequences are decoded the way terminals send them and unknown escape
/// sequences are skipped. Once the bytes run out the source idles.
#[derive(Debug)]
pub struct ReplayKeys {
    bytes: std::vec::IntoIter<u8>,
}

impl ReplayKeys {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_iter(),
        }
    }

    pub fn from_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::new(bytes))
    }

    /// Whether every recorded byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.bytes.as_slice().is_empty()
    }
}

impl KeySource for ReplayKeys {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<RawKey>> {
        while let Some(decoded) = decode_next(&mut self.bytes) {
            if let Decoded::Key(key) = decoded {
                return Ok(Some(key));
            }
        }
        std::thread::sleep(timeout);
        Ok(None)
    }
}

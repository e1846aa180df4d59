//! Byte-stream key decoding.
//!
//! Terminals send arrow keys as three bytes, `ESC [ A..D`. Everything else the
//! arcade cares about is a single ASCII byte.

use arrayvec::ArrayVec;

use crate::map::RawKey;
use crate::types::Direction;

pub const ESCAPE: u8 = 0x1b;
const CSI: u8 = b'[';
const CTRL_C: u8 = 0x03;

/// Result of decoding one key from a byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Key(RawKey),
    /// An escape sequence the arcade does not know; its bytes are consumed.
    Discarded,
}

/// Decode the next key, or `None` once the stream is exhausted.
///
/// ```
/// use tui_arcade_input::{decode_next, Decoded, RawKey};
/// use tui_arcade_types::Direction;
///
/// let mut bytes = b"\x1b[Bq".iter().copied();
/// assert_eq!(decode_next(&mut bytes), Some(Decoded::Key(RawKey::Arrow(Direction::Down))));
/// assert_eq!(decode_next(&mut bytes), Some(Decoded::Key(RawKey::Char('q'))));
/// assert_eq!(decode_next(&mut bytes), None);
/// ```
pub fn decode_next(bytes: &mut impl Iterator<Item = u8>) -> Option<Decoded> {
    let first = bytes.next()?;
    match first {
        ESCAPE => {
            let mut seq = ArrayVec::<u8, 2>::new();
            seq.extend(bytes.by_ref().take(2));
            Some(decode_escape(&seq))
        }
        CTRL_C => Some(Decoded::Key(RawKey::Interrupt)),
        b => Some(Decoded::Key(RawKey::Char(b as char))),
    }
}

/// Decode every key in `bytes`, dropping unknown sequences.
pub fn decode_all(bytes: &[u8]) -> Vec<RawKey> {
    let mut iter = bytes.iter().copied();
    let mut keys = Vec::new();
    while let Some(decoded) = decode_next(&mut iter) {
        if let Decoded::Key(key) = decoded {
            keys.push(key);
        }
    }
    keys
}

fn decode_escape(seq: &[u8]) -> Decoded {
    let dir = match seq {
        [CSI, b'A'] => Direction::Up,
        [CSI, b'B'] => Direction::Down,
        [CSI, b'C'] => Direction::Right,
        [CSI, b'D'] => Direction::Left,
        _ => return Decoded::Discarded,
    };
    Decoded::Key(RawKey::Arrow(dir))
}

//! Keystroke combination policy.
//!
//! Two independent switches decide how a freshly decoded key merges into the
//! pending keystroke:
//!
//! - `aggregate`: OR the key into the pending value instead of replacing it.
//!   Lets two players press keys within the same tick.
//! - `single_key`: under `aggregate`, clear the key's whole scheme first, so
//!   each scheme carries at most one direction (pressing right then left
//!   leaves only left).

use crate::types::Keystroke;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPolicy {
    pub aggregate: bool,
    pub single_key: bool,
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self {
            aggregate: false,
            single_key: true,
        }
    }
}

impl KeyPolicy {
    pub const OVERWRITE: KeyPolicy = KeyPolicy {
        aggregate: false,
        single_key: true,
    };

    pub const AGGREGATE: KeyPolicy = KeyPolicy {
        aggregate: true,
        single_key: true,
    };

    /// Merge `key` into `pending`.
    ///
    /// `QUIT` always wins and is never merged with directions.
    pub fn combine(self, pending: Keystroke, key: Keystroke) -> Keystroke {
        if key.is_quit() {
            return Keystroke::QUIT;
        }
        if !self.aggregate {
            return key;
        }
        let kept = pending - Keystroke::QUIT;
        if self.single_key {
            (kept - key.scheme_mask()) | key
        } else {
            kept | key
        }
    }
}

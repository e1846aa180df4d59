//! State shared between the input thread and the tick loop.
//!
//! The pending keystroke has exactly one writer while a game runs (the input
//! thread) and one reader (the tick). It is a relaxed atomic: the tick may see
//! a keystroke one poll late, which is invisible at arcade speeds, and the
//! renderer never waits on a lock.

use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::core::KeyPolicy;
use crate::types::Keystroke;

#[derive(Debug, Default)]
pub struct SharedInput {
    pending: AtomicU16,
    running: AtomicBool,
    quit: AtomicBool,
    kill: AtomicBool,
    interrupted: AtomicBool,
    refresh: AtomicBool,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending keystroke as last written.
    pub fn pending(&self) -> Keystroke {
        Keystroke::from_bits_truncate(self.pending.load(Ordering::Relaxed))
    }

    /// Replace the pending keystroke outright.
    pub fn set_pending(&self, key: Keystroke) {
        self.pending.store(key.bits(), Ordering::Relaxed);
    }

    /// Merge a freshly pressed key under `policy`.
    ///
    /// Load and store are separate; this is only correct with a single writer.
    pub fn press(&self, key: Keystroke, policy: KeyPolicy) {
        let next = policy.combine(self.pending(), key);
        self.set_pending(next);
    }

    /// Forget the pending keystroke (edge-triggered controls).
    pub fn clear_pending(&self) {
        self.set_pending(Keystroke::empty());
    }

    /// Force `QUIT`, bypassing the policy.
    pub fn force_quit(&self) {
        self.set_pending(Keystroke::QUIT);
    }

    /// What the tick should act on: `QUIT` once quitting, else the pending key.
    pub fn next_key(&self) -> Keystroke {
        if self.is_quitting() || self.is_killed() {
            Keystroke::QUIT
        } else {
            self.pending()
        }
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Relaxed);
    }

    pub fn clear_quit(&self) {
        self.quit.store(false, Ordering::Relaxed);
    }

    pub fn is_quitting(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    /// Ask the input thread to exit after its current poll.
    pub fn kill(&self) {
        self.kill.store(true, Ordering::Relaxed);
    }

    pub fn is_killed(&self) -> bool {
        self.kill.load(Ordering::Relaxed)
    }

    /// Process-level interrupt: quit everything, skip the exit prompt.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::Relaxed);
        self.quit.store(true, Ordering::Relaxed);
        self.kill.store(true, Ordering::Relaxed);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Relaxed)
    }

    pub fn request_refresh(&self) {
        self.refresh.store(true, Ordering::Relaxed);
    }

    /// Consume a pending manual refresh request.
    pub fn take_refresh(&self) -> bool {
        self.refresh.swap(false, Ordering::Relaxed)
    }
}

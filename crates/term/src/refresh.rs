//! Periodic terminal reinitialization.
//!
//! Long sessions on some terminals accumulate drawing garbage. The gate counts
//! presented frames and asks for a full teardown/redraw every `threshold`
//! frames, or immediately when the player presses the refresh key.

use crate::core::RefreshInterval;

#[derive(Debug, Clone)]
pub struct RefreshGate {
    threshold: Option<u32>,
    frames: u32,
}

impl RefreshGate {
    pub fn new(interval: RefreshInterval, speed: u8) -> Self {
        Self {
            threshold: interval.threshold(speed),
            frames: 0,
        }
    }

    /// Recompute the threshold, e.g. after a level-up changed the speed.
    pub fn set_threshold(&mut self, interval: RefreshInterval, speed: u8) {
        self.threshold = interval.threshold(speed);
    }

    pub fn threshold(&self) -> Option<u32> {
        self.threshold
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn reset(&mut self) {
        self.frames = 0;
    }

    /// Decide whether the next paint must be preceded by a reinitialization.
    ///
    /// - `manual=true`: always, and the counter restarts.
    /// - otherwise: once the counter has reached the threshold.
    pub fn should_reinitialize(&mut self, manual: bool) -> bool {
        let due = self.threshold.is_some_and(|t| self.frames >= t);
        if manual || due {
            self.frames = 0;
            return true;
        }
        self.frames += 1;
        false
    }
}

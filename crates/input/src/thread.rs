//! The input capture thread.
//!
//! It is the only reader of the key source for the whole session. While a game
//! runs, decoded directions are merged into the shared pending keystroke; while
//! the engine shows a prompt, raw keys are forwarded over a channel so the main
//! thread can block on them without a second terminal reader.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::map::{classify, KeyAction, RawKey};
use crate::core::KeyPolicy;
use crate::source::KeySource;
use crate::state::SharedInput;
use crate::types::INPUT_POLL_MS;

pub const POLL_TIMEOUT: Duration = Duration::from_millis(INPUT_POLL_MS);

/// Handle to a running input thread.
///
/// Joining hands the key source back so a final prompt can still read it.
#[derive(Debug)]
pub struct InputThread {
    handle: JoinHandle<Box<dyn KeySource>>,
}

impl InputThread {
    pub fn spawn(
        mut source: Box<dyn KeySource>,
        shared: Arc<SharedInput>,
        policy: KeyPolicy,
        prompt: Sender<RawKey>,
    ) -> io::Result<Self> {
        let handle = thread::Builder::new().name("arcade-input".into()).spawn(move || {
            tracing::debug!("input thread started");
            while !shared.is_killed() {
                match source.poll_key(POLL_TIMEOUT) {
                    Ok(Some(key)) => dispatch(key, &shared, policy, &prompt),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "key source failed, stopping input");
                        shared.kill();
                    }
                }
            }
            shared.force_quit();
            tracing::debug!("input thread stopped");
            source
        })?;
        Ok(Self { handle })
    }

    /// Wait for the thread to exit. The caller must have called
    /// [`SharedInput::kill`] first.
    pub fn join(self) -> Option<Box<dyn KeySource>> {
        match self.handle.join() {
            Ok(source) => Some(source),
            Err(_) => {
                tracing::warn!("input thread panicked");
                None
            }
        }
    }
}

fn dispatch(key: RawKey, shared: &SharedInput, policy: KeyPolicy, prompt: &Sender<RawKey>) {
    let action = classify(key);
    if action == KeyAction::Interrupt {
        shared.interrupt();
        return;
    }
    if !shared.is_running() {
        let _ = prompt.send(key);
        return;
    }
    match action {
        KeyAction::Steer(k) => shared.press(k, policy),
        KeyAction::Refresh => shared.request_refresh(),
        KeyAction::Quit => shared.request_quit(),
        KeyAction::Interrupt | KeyAction::Ignored => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedKeys;
    use crate::types::{Direction, Keystroke};
    use std::time::Instant;

    fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        cond()
    }

    #[test]
    fn kill_forces_quit_and_returns_source() {
        let (keys, _feed) = ScriptedKeys::new();
        let shared = Arc::new(SharedInput::new());
        shared.set_pending(Keystroke::UP | Keystroke::LEFT2);
        let (tx, _rx) = crossbeam_channel::unbounded();
        let t = InputThread::spawn(Box::new(keys), shared.clone(), KeyPolicy::AGGREGATE, tx).unwrap();

        shared.kill();
        assert!(t.join().is_some());
        assert_eq!(shared.pending(), Keystroke::QUIT);
    }

    #[test]
    fn running_keys_go_to_pending_prompt_keys_to_channel() {
        let (keys, feed) = ScriptedKeys::new();
        let shared = Arc::new(SharedInput::new());
        let (tx, rx) = crossbeam_channel::unbounded();
        let t = InputThread::spawn(Box::new(keys), shared.clone(), KeyPolicy::OVERWRITE, tx).unwrap();

        feed.key(RawKey::Arrow(Direction::Up));
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(RawKey::Arrow(Direction::Up)));
        assert_eq!(shared.pending(), Keystroke::empty());

        shared.set_running(true);
        feed.char('s');
        assert!(wait_for(|| shared.pending() == Keystroke::DOWN2));
        feed.char('q');
        assert!(wait_for(|| shared.is_quitting()));
        assert!(rx.try_recv().is_err());

        shared.kill();
        t.join();
    }

    #[test]
    fn ctrl_c_interrupts() {
        let (keys, feed) = ScriptedKeys::new();
        let shared = Arc::new(SharedInput::new());
        let (tx, _rx) = crossbeam_channel::unbounded();
        let t = InputThread::spawn(Box::new(keys), shared.clone(), KeyPolicy::OVERWRITE, tx).unwrap();

        feed.key(RawKey::Interrupt);
        assert!(wait_for(|| shared.is_interrupted()));
        t.join();
        assert_eq!(shared.pending(), Keystroke::QUIT);
    }
}

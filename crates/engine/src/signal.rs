//! SIGINT/SIGTERM handling.
//!
//! In raw mode Ctrl-C arrives as a key, but a `kill` from another shell does
//! not. The guard turns both signals into the interrupt flag so the lifecycle
//! winds down through `stop` and the terminal is restored.

use std::io;
use std::sync::Arc;

use crate::input::SharedInput;

#[cfg(unix)]
#[derive(Debug)]
pub struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    pub fn install(shared: Arc<SharedInput>) -> io::Result<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::Builder::new().name("arcade-signals".into()).spawn(move || {
            for signal in signals.forever() {
                tracing::warn!(signal, "termination signal received, stopping");
                shared.interrupt();
            }
        })?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(not(unix))]
#[derive(Debug)]
pub struct SignalGuard;

#[cfg(not(unix))]
impl SignalGuard {
    pub fn install(_shared: Arc<SharedInput>) -> io::Result<Self> {
        Ok(Self)
    }
}

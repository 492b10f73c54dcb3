//! Synchronous command gate.
//!
//! UNO commands are dispatched to LibreOffice asynchronously; the engine
//! reports completion through a document callback invoked on a thread it
//! manages. The tools in this repo are single-threaded and usually need to
//! know a command has finished before issuing the next one (for example
//! `.uno:Add` must complete before `setPart` can select the new sheet).
//!
//! `CommandGate` turns that callback into a blocking wait: a mutex-guarded
//! completion flag plus a condvar. The flag is cleared *before* the command
//! is handed to the engine and the wait re-checks the flag under the same
//! lock the callback uses to set it, so a completion that fires before the
//! wait begins — even synchronously inside the dispatch call — is never
//! lost.
//!
//! The gate tracks a single in-flight command. The callers here submit
//! strictly one at a time; it does not extend to overlapping submissions.

use std::sync::{Condvar, Mutex};

/// Completion bridge between the engine's callback thread and the caller.
#[derive(Debug, Default)]
pub struct CommandGate {
    completed: Mutex<bool>,
    cond: Condvar,
}

impl CommandGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch one command and optionally block until its completion is
    /// signalled via [`complete`](Self::complete).
    ///
    /// The completion flag is reset before `dispatch` runs, so only a
    /// completion observed after this call can satisfy the wait; a stale
    /// signal from an earlier command cannot.
    ///
    /// There is no timeout: an engine that never signals completion blocks
    /// the caller forever.
    pub fn submit<F: FnOnce()>(&self, dispatch: F, wait: bool) {
        *self.completed.lock().unwrap() = false;

        dispatch();

        if wait {
            let mut done = self.completed.lock().unwrap();
            while !*done {
                done = self.cond.wait(done).unwrap();
            }
        }
    }

    /// Callback side: mark the in-flight command complete and wake the
    /// waiter. Safe to call from any thread, including from inside the
    /// dispatch call itself.
    pub fn complete(&self) {
        {
            let mut done = self.completed.lock().unwrap();
            *done = true;
        }
        self.cond.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Fake engine that signals completion from its own thread after a delay.
    fn complete_after(gate: &Arc<CommandGate>, delay: Duration) -> impl FnOnce() {
        let gate = Arc::clone(gate);
        move || {
            std::thread::spawn(move || {
                std::thread::sleep(delay);
                gate.complete();
            });
        }
    }

    #[test]
    fn wait_blocks_until_delayed_completion() {
        let gate = Arc::new(CommandGate::new());
        let delay = Duration::from_millis(5);

        let start = Instant::now();
        gate.submit(complete_after(&gate, delay), true);

        assert!(start.elapsed() >= delay);
        assert!(*gate.completed.lock().unwrap());
    }

    #[test]
    fn synchronous_completion_is_not_lost() {
        let gate = Arc::new(CommandGate::new());

        // The engine invokes the callback before dispatch returns.
        let inner = Arc::clone(&gate);
        gate.submit(move || inner.complete(), true);

        assert!(*gate.completed.lock().unwrap());
    }

    #[test]
    fn no_wait_returns_immediately() {
        let gate = Arc::new(CommandGate::new());

        // No completion ever arrives; submit must still return.
        gate.submit(|| {}, false);

        assert!(!*gate.completed.lock().unwrap());
    }

    #[test]
    fn sequential_submissions_observe_their_own_completion() {
        let gate = Arc::new(CommandGate::new());

        // First command completes synchronously, leaving the flag set.
        let inner = Arc::clone(&gate);
        gate.submit(move || inner.complete(), true);

        // The second must not return early on the first command's stale
        // flag; it has to wait out its own delayed completion.
        let delay = Duration::from_millis(10);
        let start = Instant::now();
        gate.submit(complete_after(&gate, delay), true);

        assert!(start.elapsed() >= delay);
    }

    #[test]
    fn completion_between_dispatch_and_wait_is_observed() {
        let gate = Arc::new(CommandGate::new());

        // Zero delay makes it likely the callback fires in the window
        // between dispatch returning and the wait acquiring the lock.
        for _ in 0..100 {
            gate.submit(complete_after(&gate, Duration::ZERO), true);
        }
    }
}

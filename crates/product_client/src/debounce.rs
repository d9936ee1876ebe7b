use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A single-slot cancellable timer.
///
/// Scheduling aborts whatever was scheduled before, so at most one timer task
/// is alive at any instant. Dropping the timer cancels it.
pub struct DebounceTimer {
    runtime: Handle,
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: None,
        }
    }

    /// Run `on_fire` after `delay` unless rescheduled or cancelled first.
    pub fn schedule<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        });
        self.pending = Some(task);
    }

    /// Abort the pending timer. Returns true if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(task) => {
                let waiting = !task.is_finished();
                task.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

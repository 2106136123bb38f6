//! Delayed, cancellable tasks.
//!
//! A [`DelayedTask`] runs an action once a delay has elapsed. Scheduling it
//! again supersedes (cancels) whatever was still pending, which gives both
//! debounce semantics (typing-idle) and "latest wins" deferral (scroll).

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// A single slot for a deferred action.
#[derive(Debug)]
pub struct DelayedTask {
    name: &'static str,
    pending: Option<CancellationToken>,
}

impl DelayedTask {
    /// Create an empty slot. `name` is only used for logging.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: None,
        }
    }

    /// Run `action` after `delay`, cancelling any previously scheduled action.
    ///
    /// Outside a tokio runtime nothing is scheduled.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(task = self.name, "No runtime; delayed task skipped");
            return;
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let name = self.name;
        handle.spawn(async move {
            tokio::select! {
                () = cancelled.cancelled() => {
                    tracing::trace!(task = name, "Delayed task superseded");
                }
                () = tokio::time::sleep(delay) => action(),
            }
        });
        self.pending = Some(token);
    }

    /// Cancel the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

//! Cancellable timer used to coalesce rapid search input.
//!
//! The debouncer never reads a clock. Callers pass instants as offsets from a
//! session origin, which keeps the scheduling rules a pure function of the
//! input stream and lets the async adapter and the tests share one model.

use std::time::Duration;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    due: Duration,
    value: T,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Replaces any pending value and restarts the quiet period at `at`.
    /// Returns `true` when an earlier pending value was superseded.
    pub fn schedule(&mut self, at: Duration, value: T) -> bool {
        let due = at.saturating_add(self.wait);
        self.pending.replace(Pending { due, value }).is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending value once `now` reaches its deadline.
    pub fn fire(&mut self, now: Duration) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|pending| now >= pending.due);
        if due {
            self.pending.take().map(|pending| pending.value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

/// Maps a stream of timestamped inputs to the values that actually fire and
/// when. Inputs must be ordered by time; a value fires only if no newer input
/// arrives before its quiet period elapses. The trailing pending value is
/// always flushed.
pub fn coalesce<T, I>(inputs: I, wait: Duration) -> Vec<(Duration, T)>
where
    I: IntoIterator<Item = (Duration, T)>,
{
    let mut debouncer = Debouncer::new(wait);
    let mut fired = Vec::new();

    for (at, value) in inputs {
        if let Some(due) = debouncer.deadline() {
            if let Some(ready) = debouncer.fire(at) {
                fired.push((due, ready));
            }
        }
        debouncer.schedule(at, value);
    }

    if let Some(due) = debouncer.deadline() {
        if let Some(ready) = debouncer.fire(due) {
            fired.push((due, ready));
        }
    }

    fired
}

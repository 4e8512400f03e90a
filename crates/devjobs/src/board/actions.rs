use super::domain::{JobId, JobRecord};
use super::notify::{Notification, Notifier};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// Delays used to simulate the apply and load-more round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTimings {
    pub apply_delay: Duration,
    pub load_more_delay: Duration,
}

impl Default for ActionTimings {
    fn default() -> Self {
        Self {
            apply_delay: Duration::from_millis(2_000),
            load_more_delay: Duration::from_millis(1_500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyStatus {
    #[default]
    Idle,
    Applying,
    Applied,
}

impl ApplyStatus {
    /// Button caption for the listing's apply control.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Apply Now",
            Self::Applying => "Applying...",
            Self::Applied => "Applied!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Submitted,
    InFlight,
    AlreadyApplied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreOutcome {
    /// The simulated fetch finished; there is never anything new.
    Exhausted,
    Busy,
}

/// Simulated apply and load-more actions. Cloning shares state, so the
/// adapter can hand copies to spawned tasks.
pub struct BoardActions<N> {
    timings: ActionTimings,
    notifier: Arc<N>,
    applications: Arc<Mutex<HashMap<JobId, ApplyStatus>>>,
    loading: Arc<AtomicBool>,
}

impl<N> Clone for BoardActions<N> {
    fn clone(&self) -> Self {
        Self {
            timings: self.timings,
            notifier: Arc::clone(&self.notifier),
            applications: Arc::clone(&self.applications),
            loading: Arc::clone(&self.loading),
        }
    }
}

impl<N> BoardActions<N>
where
    N: Notifier + 'static,
{
    pub fn new(notifier: Arc<N>, timings: ActionTimings) -> Self {
        Self {
            timings,
            notifier,
            applications: Arc::new(Mutex::new(HashMap::new())),
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn status(&self, id: &JobId) -> ApplyStatus {
        self.applications
            .lock()
            .ok()
            .and_then(|guard| guard.get(id).copied())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Marks the listing as applying, waits out the apply delay, then marks
    /// it applied and announces the submission.
    pub async fn apply(&self, record: &JobRecord) -> ApplyOutcome {
        match self.transition(&record.id, ApplyStatus::Applying) {
            ApplyStatus::Applying => return ApplyOutcome::InFlight,
            ApplyStatus::Applied => return ApplyOutcome::AlreadyApplied,
            ApplyStatus::Idle => {}
        }

        tokio::time::sleep(self.timings.apply_delay).await;

        self.transition(&record.id, ApplyStatus::Applied);
        info!(job = %record.id, company = %record.company, "application submitted");
        self.notifier.notify(Notification::success(format!(
            "Application submitted for {} at {}!",
            record.title, record.company
        )));
        ApplyOutcome::Submitted
    }

    /// Pretends to fetch another page. Concurrent presses while loading are
    /// ignored.
    pub async fn load_more(&self) -> LoadMoreOutcome {
        if self.loading.swap(true, Ordering::AcqRel) {
            return LoadMoreOutcome::Busy;
        }

        tokio::time::sleep(self.timings.load_more_delay).await;

        self.loading.store(false, Ordering::Release);
        info!("load more finished with no new listings");
        self.notifier
            .notify(Notification::info("No more jobs to load at the moment."));
        LoadMoreOutcome::Exhausted
    }

    // Returns the previous status. Only Idle -> Applying and
    // Applying -> Applied are honored.
    fn transition(&self, id: &JobId, next: ApplyStatus) -> ApplyStatus {
        let Ok(mut guard) = self.applications.lock() else {
            return ApplyStatus::Idle;
        };
        let entry = guard.entry(id.clone()).or_default();
        let previous = *entry;
        match (previous, next) {
            (ApplyStatus::Idle, ApplyStatus::Applying)
            | (ApplyStatus::Applying, ApplyStatus::Applied) => *entry = next,
            _ => {}
        }
        previous
    }
}

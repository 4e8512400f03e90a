use devjobs::board::{
    BoardRenderer, JobCatalog, JobRecord, Notification, Notifier, RevealPlan,
};
use devjobs::error::AppError;
use std::path::Path;
#[cfg(test)]
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Vec<JobRecord>, AppError> {
    match path {
        Some(path) => Ok(JobCatalog::from_path(path)?),
        None => Ok(JobCatalog::sample()),
    }
}

pub(crate) fn render_card_line(record: &JobRecord) -> String {
    format!(
        "{} | {} @ {} | {} | {} | {} | [{}]",
        record.id,
        record.title,
        record.company,
        record.location,
        record.experience_level,
        record.salary_text,
        record.tags.join(", ")
    )
}

/// Prints the board to stdout. Reveal offsets are shown instead of animated.
pub(crate) struct ConsoleRenderer {
    reveal: RevealPlan,
}

impl ConsoleRenderer {
    pub(crate) fn new(reveal: RevealPlan) -> Self {
        Self { reveal }
    }
}

impl BoardRenderer for ConsoleRenderer {
    fn render(&mut self, visible: &[&JobRecord], count: usize) {
        println!("{}", devjobs::board::count_label(count));
        if visible.is_empty() {
            println!("  {}", devjobs::board::view::EMPTY_STATE_TITLE);
            println!("  {}", devjobs::board::view::EMPTY_STATE_HINT);
            return;
        }
        for (record, at) in visible.iter().zip(self.reveal.schedule(count)) {
            println!("  +{:>4}ms  {}", at.as_millis(), render_card_line(record));
        }
    }
}

/// Prints toasts as they arrive and logs their dismissal once the TTL passes.
pub(crate) struct ConsoleNotifier {
    ttl: Duration,
}

impl ConsoleNotifier {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        println!(
            "[{}:{}] {}",
            notification.level.style(),
            notification.level.icon(),
            notification.message
        );

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let ttl = self.ttl;
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                debug!(message = %notification.message, "toast dismissed");
            });
        }
    }
}

/// Renderer that keeps every frame, for session tests.
#[cfg(test)]
#[derive(Default, Clone)]
pub(crate) struct CapturingRenderer {
    frames: Arc<Mutex<Vec<Vec<String>>>>,
}

#[cfg(test)]
impl CapturingRenderer {
    pub(crate) fn frames(&self) -> Vec<Vec<String>> {
        self.frames.lock().expect("frames mutex poisoned").clone()
    }
}

#[cfg(test)]
impl BoardRenderer for CapturingRenderer {
    fn render(&mut self, visible: &[&JobRecord], _count: usize) {
        let frame = visible.iter().map(|record| record.id.0.clone()).collect();
        self.frames.lock().expect("frames mutex poisoned").push(frame);
    }
}

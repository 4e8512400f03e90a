use crate::script::ScriptStep;
use devjobs::board::{
    BoardActions, BoardRenderer, Debouncer, FilterEngine, JobId, Notification, Notifier,
    SortMode,
};
use devjobs::config::BoardConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Typed input notifications, as a page's controls would raise them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiEvent {
    RoleToggled { role: String, selected: bool },
    TechToggled { tech: String, selected: bool },
    LocationChanged(String),
    ExperienceChanged(String),
    SearchInput(String),
    SortChanged(String),
    ClearFilters,
    Apply(JobId),
    LoadMore,
}

/// Presentation adapter: routes UI events into the engine, debounces search
/// input, and runs simulated actions on the tokio clock.
pub(crate) struct BoardSession<R, N> {
    engine: FilterEngine,
    search: Debouncer<String>,
    actions: BoardActions<N>,
    notifier: Arc<N>,
    renderer: R,
    origin: Instant,
    in_flight: Vec<JoinHandle<()>>,
    recomputes: usize,
}

impl<R, N> BoardSession<R, N>
where
    R: BoardRenderer,
    N: Notifier + 'static,
{
    pub(crate) fn new(
        engine: FilterEngine,
        renderer: R,
        notifier: Arc<N>,
        config: &BoardConfig,
    ) -> Self {
        let actions = BoardActions::new(Arc::clone(&notifier), config.action_timings());
        Self {
            engine,
            search: Debouncer::new(config.search_debounce),
            actions,
            notifier,
            renderer,
            origin: Instant::now(),
            in_flight: Vec::new(),
            recomputes: 0,
        }
    }

    pub(crate) fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    /// Filter recomputations triggered so far, including debounced searches.
    pub(crate) fn recomputes(&self) -> usize {
        self.recomputes
    }

    /// Consumes events until the sender closes, then lets any pending search
    /// and in-flight actions finish.
    pub(crate) async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> Self {
        info!(
            listings = self.engine.records().len(),
            debounce_ms = self.search.wait().as_millis() as u64,
            "board session started"
        );
        self.render();

        loop {
            let wake = self
                .search
                .deadline()
                .map(|due| self.origin + due)
                .unwrap_or_else(|| Instant::now() + Duration::from_secs(3_600));

            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
                _ = tokio::time::sleep_until(wake), if self.search.is_pending() => {
                    self.flush_search();
                }
            }
        }

        if let Some(due) = self.search.deadline() {
            tokio::time::sleep_until(self.origin + due).await;
            self.flush_search();
        }

        for task in self.in_flight.drain(..) {
            if let Err(err) = task.await {
                warn!(error = %err, "board action task failed");
            }
        }

        info!(
            recomputes = self.recomputes,
            visible = self.engine.count(),
            "board session finished"
        );
        self
    }

    pub(crate) fn handle(&mut self, event: UiEvent) {
        debug!(?event, "ui event");
        match event {
            UiEvent::RoleToggled { role, selected } => {
                self.engine.set_role_selected(&role, selected);
                self.after_filter();
            }
            UiEvent::TechToggled { tech, selected } => {
                self.engine.set_tech_selected(&tech, selected);
                self.after_filter();
            }
            UiEvent::LocationChanged(value) => {
                self.engine.set_location(&value);
                self.after_filter();
            }
            UiEvent::ExperienceChanged(value) => {
                self.engine.set_experience(&value);
                self.after_filter();
            }
            UiEvent::SearchInput(text) => {
                let at = self.elapsed();
                if self.search.schedule(at, text) {
                    debug!("superseded pending search");
                }
            }
            UiEvent::SortChanged(value) => {
                let mode = SortMode::from_value(&value);
                if mode.is_none() {
                    warn!(%value, "unrecognized sort option; keeping current order");
                }
                self.engine.set_sort_mode(mode);
                self.render();
            }
            UiEvent::ClearFilters => {
                self.search.cancel();
                self.engine.clear_all();
                self.render();
                self.notifier.notify(Notification::filters_cleared());
            }
            UiEvent::Apply(id) => self.apply(id),
            UiEvent::LoadMore => {
                let actions = self.actions.clone();
                self.track(tokio::spawn(async move {
                    actions.load_more().await;
                }));
            }
        }
    }

    fn apply(&mut self, id: JobId) {
        let Some(record) = self.engine.record(&id).cloned() else {
            warn!(job = %id, "apply requested for unknown listing");
            self.notifier
                .notify(Notification::error(format!("No listing with id {id}.")));
            return;
        };

        let actions = self.actions.clone();
        self.track(tokio::spawn(async move {
            let outcome = actions.apply(&record).await;
            debug!(
                job = %record.id,
                ?outcome,
                button = actions.status(&record.id).label(),
                "apply settled"
            );
        }));
    }

    /// Keeps a spawned action joinable at shutdown, dropping handles of
    /// tasks that already finished.
    fn track(&mut self, task: JoinHandle<()>) {
        self.in_flight.retain(|handle| !handle.is_finished());
        self.in_flight.push(task);
    }

    fn flush_search(&mut self) {
        let now = self.elapsed();
        if let Some(text) = self.search.fire(now) {
            self.engine.set_search(&text);
            self.after_filter();
        }
    }

    fn after_filter(&mut self) {
        self.recomputes += 1;
        self.render();
    }

    fn render(&mut self) {
        self.engine.render_to(&mut self.renderer);
    }

    fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.origin)
    }
}

/// Feeds scripted steps into a session channel, sleeping through waits.
pub(crate) async fn replay(steps: Vec<ScriptStep>, events: mpsc::Sender<UiEvent>) {
    for step in steps {
        match step {
            ScriptStep::Wait(delay) => tokio::time::sleep(delay).await,
            ScriptStep::Event(event) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::CapturingRenderer;
    use crate::script::parse_script;
    use devjobs::board::{JobCatalog, NotificationLevel, RecordingNotifier};

    fn session() -> (
        BoardSession<CapturingRenderer, RecordingNotifier>,
        CapturingRenderer,
        Arc<RecordingNotifier>,
    ) {
        let renderer = CapturingRenderer::default();
        let notifier = Arc::new(RecordingNotifier::default());
        let session = BoardSession::new(
            FilterEngine::new(JobCatalog::sample()),
            renderer.clone(),
            notifier.clone(),
            &BoardConfig::default(),
        );
        (session, renderer, notifier)
    }

    async fn replay_script(
        session: BoardSession<CapturingRenderer, RecordingNotifier>,
        script: &str,
    ) -> BoardSession<CapturingRenderer, RecordingNotifier> {
        let steps = parse_script(script).expect("script parses");
        let (tx, rx) = mpsc::channel(16);
        let feeder = tokio::spawn(replay(steps, tx));
        let session = session.run(rx).await;
        feeder.await.expect("feeder joins");
        session
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_typing_recomputes_once_with_final_text() {
        let (session, _renderer, _notifier) = session();

        let session = replay_script(session, "type react").await;

        assert_eq!(session.recomputes(), 1);
        assert_eq!(session.engine().criteria().search_text, "react");
    }

    #[tokio::test(start_paused = true)]
    async fn pausing_between_words_searches_twice() {
        let (session, _renderer, _notifier) = session();

        let session = replay_script(session, "type py\nwait 500\ntype java").await;

        assert_eq!(session.recomputes(), 2);
        assert_eq!(session.engine().criteria().search_text, "java");
    }

    #[tokio::test(start_paused = true)]
    async fn clear_drops_pending_search_and_notifies() {
        let (session, renderer, notifier) = session();
        let total = session.engine().records().len();

        let session = replay_script(session, "role backend on\ntype kafka\nclear").await;

        assert_eq!(session.recomputes(), 1);
        assert_eq!(session.engine().count(), total);
        assert_eq!(renderer.frames().last().map(Vec::len), Some(total));
        let events = notifier.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "All filters cleared!");
    }

    #[tokio::test(start_paused = true)]
    async fn sort_reorders_and_unknown_sort_is_ignored() {
        let (session, renderer, _notifier) = session();

        let session = replay_script(session, "role backend on\nsort salary\nsort relevance").await;

        let frames = renderer.frames();
        let sorted = frames[frames.len() - 2].clone();
        assert_eq!(sorted, vec!["job-006", "job-002", "job-008"]);
        assert_eq!(frames.last(), Some(&sorted));
        assert_eq!(session.engine().criteria().sort_mode, None);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_actions_are_not_retained() {
        let (mut session, _renderer, _notifier) = session();
        let delay = BoardConfig::default().action_timings().load_more_delay;

        for _ in 0..3 {
            session.handle(UiEvent::LoadMore);
            tokio::time::sleep(delay + Duration::from_millis(10)).await;
        }
        session.handle(UiEvent::Apply(JobId::from("job-003")));

        assert_eq!(session.in_flight.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn applied_listing_reports_applied_button() {
        let (session, _renderer, _notifier) = session();
        let id = JobId::from("job-003");

        let session = replay_script(session, "apply job-003").await;

        assert_eq!(session.actions.status(&id).label(), "Applied!");
    }

    #[tokio::test(start_paused = true)]
    async fn actions_complete_before_session_returns() {
        let (session, _renderer, notifier) = session();

        replay_script(session, "apply job-003\nload-more\napply job-999").await;

        let events = notifier.events();
        let messages: Vec<&str> = events.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].level, NotificationLevel::Error);
        assert!(messages.contains(&"No more jobs to load at the moment."));
        assert!(messages.contains(&"Application submitted for Full Stack Developer at StartupXYZ!"));
    }
}

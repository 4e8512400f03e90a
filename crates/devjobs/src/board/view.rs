use super::criteria::FilterCriteria;
use super::domain::{JobId, JobRecord, SortMode};
use serde::Serialize;
use std::time::Duration;

pub const EMPTY_STATE_TITLE: &str = "No jobs found";
pub const EMPTY_STATE_HINT: &str =
    "Try adjusting your filters or search terms to find more opportunities.";

/// Callback invoked with the visible records after every state change.
pub trait BoardRenderer {
    fn render(&mut self, visible: &[&JobRecord], count: usize);
}

/// `"Showing 1 job"`, `"Showing 0 jobs"`, `"Showing 7 jobs"`.
pub fn count_label(count: usize) -> String {
    let noun = if count == 1 { "job" } else { "jobs" };
    format!("Showing {count} {noun}")
}

#[derive(Debug, Clone, Serialize)]
pub struct JobCardView {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub experience_level: String,
    pub salary_text: String,
    pub tags: Vec<String>,
}

impl JobCardView {
    pub fn from_record(record: &JobRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            company: record.company.clone(),
            location: record.location.clone(),
            experience_level: record.experience_level.clone(),
            salary_text: record.salary_text.clone(),
            tags: record.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: EMPTY_STATE_TITLE,
            hint: EMPTY_STATE_HINT,
        }
    }
}

/// Serializable snapshot of what the board currently shows.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub count: usize,
    pub count_label: String,
    /// False when no filter narrows the listings, whatever the sort.
    pub filtered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_mode: Option<SortMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_label: Option<&'static str>,
    pub cards: Vec<JobCardView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

impl BoardView {
    pub fn new(visible: &[&JobRecord], criteria: &FilterCriteria) -> Self {
        let count = visible.len();
        Self {
            count,
            count_label: count_label(count),
            filtered: !criteria.is_unrestricted(),
            sort_mode: criteria.sort_mode,
            sort_label: criteria.sort_mode.map(SortMode::label),
            cards: visible.iter().map(|record| JobCardView::from_record(record)).collect(),
            empty_state: (count == 0).then(EmptyState::default),
        }
    }
}

/// Staged reveal schedule: all cards hide, then after `fade` each visible card
/// fades in `stagger` after the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPlan {
    pub fade: Duration,
    pub stagger: Duration,
}

impl RevealPlan {
    pub fn reveal_at(&self, position: usize) -> Duration {
        let steps = u32::try_from(position).unwrap_or(u32::MAX);
        self.fade.saturating_add(self.stagger.saturating_mul(steps))
    }

    /// Reveal offsets for `count` cards, in display order.
    pub fn schedule(&self, count: usize) -> Vec<Duration> {
        (0..count).map(|position| self.reveal_at(position)).collect()
    }
}

impl Default for RevealPlan {
    fn default() -> Self {
        Self {
            fade: Duration::from_millis(300),
            stagger: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(0), "Showing 0 jobs");
        assert_eq!(count_label(1), "Showing 1 job");
        assert_eq!(count_label(2), "Showing 2 jobs");
    }

    #[test]
    fn empty_view_carries_empty_state() {
        let view = BoardView::new(&[], &FilterCriteria::default());
        assert_eq!(view.count, 0);
        assert!(!view.filtered);
        assert_eq!(view.empty_state, Some(EmptyState::default()));

        let json = serde_json::to_value(&view).expect("view serializes");
        assert_eq!(json["empty_state"]["title"], EMPTY_STATE_TITLE);
        assert!(json.get("sort_mode").is_none());
        assert!(json.get("sort_label").is_none());
    }

    #[test]
    fn view_reports_sort_caption_and_whether_filters_apply() {
        let mut criteria = FilterCriteria {
            sort_mode: Some(SortMode::Salary),
            ..FilterCriteria::default()
        };

        let sorted_only = BoardView::new(&[], &criteria);
        assert!(!sorted_only.filtered);
        assert_eq!(sorted_only.sort_label, Some("Highest Salary"));

        criteria.set_search("rust");
        let json = serde_json::to_value(BoardView::new(&[], &criteria)).expect("view serializes");
        assert_eq!(json["filtered"], true);
        assert_eq!(json["sort_mode"], "salary");
        assert_eq!(json["sort_label"], "Highest Salary");
    }

    #[test]
    fn reveal_plan_staggers_after_fade() {
        let plan = RevealPlan::default();
        assert_eq!(
            plan.schedule(3),
            vec![
                Duration::from_millis(300),
                Duration::from_millis(400),
                Duration::from_millis(500)
            ]
        );
    }
}

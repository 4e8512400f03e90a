use super::criteria::FilterCriteria;
use super::domain::{JobId, JobRecord, SortMode};
use super::sort::sort_visible;
use super::view::{count_label, BoardRenderer, BoardView};
use tracing::debug;

/// Positions of the records that satisfy `criteria`, in insertion order.
pub fn recompute(records: &[JobRecord], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

/// Holds the loaded listings, the session's criteria, and the derived
/// visible sequence.
///
/// Filter changes rebuild the visible sequence from scratch in insertion
/// order; a previously chosen sort is not reapplied until the caller submits
/// [`FilterEngine::set_sort_mode`] again.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    records: Vec<JobRecord>,
    criteria: FilterCriteria,
    visible: Vec<usize>,
}

impl FilterEngine {
    pub fn new(records: Vec<JobRecord>) -> Self {
        let records: Vec<JobRecord> = records
            .into_iter()
            .enumerate()
            .map(|(idx, mut record)| {
                record.original_index = idx;
                record
            })
            .collect();
        let visible = (0..records.len()).collect();

        Self {
            records,
            criteria: FilterCriteria::default(),
            visible,
        }
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn record(&self, id: &JobId) -> Option<&JobRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn visible(&self) -> Vec<&JobRecord> {
        self.visible.iter().map(|&idx| &self.records[idx]).collect()
    }

    pub fn visible_ids(&self) -> Vec<&JobId> {
        self.visible.iter().map(|&idx| &self.records[idx].id).collect()
    }

    pub fn count(&self) -> usize {
        self.visible.len()
    }

    pub fn count_label(&self) -> String {
        count_label(self.count())
    }

    pub fn view(&self) -> BoardView {
        BoardView::new(&self.visible(), &self.criteria)
    }

    pub fn render_to<R: BoardRenderer + ?Sized>(&self, renderer: &mut R) {
        let visible = self.visible();
        renderer.render(&visible, visible.len());
    }

    pub fn set_role_selected(&mut self, role: &str, selected: bool) {
        self.criteria.set_role(role, selected);
        self.recompute();
    }

    pub fn set_tech_selected(&mut self, tech: &str, selected: bool) {
        self.criteria.set_tech(tech, selected);
        self.recompute();
    }

    pub fn set_location(&mut self, value: &str) {
        self.criteria.set_location(value);
        self.recompute();
    }

    pub fn set_experience(&mut self, value: &str) {
        self.criteria.set_experience(value);
        self.recompute();
    }

    /// Expects already-debounced input; every call recomputes.
    pub fn set_search(&mut self, text: &str) {
        self.criteria.set_search(text);
        self.recompute();
    }

    /// Reorders what is currently visible without filtering again. `None`
    /// (an unrecognized select value) leaves the order as it is.
    pub fn set_sort_mode(&mut self, mode: Option<SortMode>) {
        self.criteria.sort_mode = mode;
        if let Some(mode) = mode {
            sort_visible(&self.records, &mut self.visible, mode);
            debug!(sort = %mode, "reordered visible listings");
        }
    }

    /// Drops every criterion and shows all listings in insertion order.
    pub fn clear_all(&mut self) {
        self.criteria = FilterCriteria::default();
        self.visible = (0..self.records.len()).collect();
        debug!(visible = self.visible.len(), "cleared all filters");
    }

    fn recompute(&mut self) {
        self.visible = recompute(&self.records, &self.criteria);
        debug!(
            visible = self.visible.len(),
            total = self.records.len(),
            "recomputed visible listings"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, role: &str, company: &str, salary: &str) -> JobRecord {
        JobRecord {
            id: JobId::from(id),
            title: format!("{role} engineer"),
            company: company.to_string(),
            description: String::new(),
            tags: Vec::new(),
            role: role.to_string(),
            location: "remote".to_string(),
            experience_level: "mid".to_string(),
            salary_text: salary.to_string(),
            original_index: 99,
        }
    }

    fn engine() -> FilterEngine {
        FilterEngine::new(vec![
            record("a", "backend", "Zeta", "$90k"),
            record("b", "frontend", "Acme", "$120k"),
            record("c", "frontend", "Beta", "$90k"),
        ])
    }

    fn ids(engine: &FilterEngine) -> Vec<&str> {
        engine.visible_ids().into_iter().map(|id| id.0.as_str()).collect()
    }

    #[test]
    fn construction_assigns_positions_and_shows_everything() {
        let engine = engine();
        let positions: Vec<usize> = engine.records().iter().map(|r| r.original_index).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(ids(&engine), vec!["a", "b", "c"]);
    }

    #[test]
    fn sort_is_not_reapplied_after_filter_change() {
        let mut engine = engine();
        engine.set_sort_mode(Some(SortMode::Company));
        assert_eq!(ids(&engine), vec!["b", "c", "a"]);

        engine.set_experience("mid");
        assert_eq!(ids(&engine), vec!["a", "b", "c"]);
        assert_eq!(engine.criteria().sort_mode, Some(SortMode::Company));
    }

    #[test]
    fn unknown_sort_keeps_current_order() {
        let mut engine = engine();
        engine.set_sort_mode(Some(SortMode::Newest));
        engine.set_sort_mode(None);
        assert_eq!(ids(&engine), vec!["c", "b", "a"]);
    }

    #[test]
    fn render_to_passes_visible_and_count() {
        struct Capture(Vec<(Vec<String>, usize)>);

        impl BoardRenderer for Capture {
            fn render(&mut self, visible: &[&JobRecord], count: usize) {
                self.0
                    .push((visible.iter().map(|r| r.id.0.clone()).collect(), count));
            }
        }

        let mut engine = engine();
        engine.set_role_selected("frontend", true);
        let mut capture = Capture(Vec::new());
        engine.render_to(&mut capture);
        assert_eq!(capture.0, vec![(vec!["b".to_string(), "c".to_string()], 2)]);
    }
}

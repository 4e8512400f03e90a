use super::domain::{JobRecord, SortMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Every user-selected filter and sort parameter for a board session.
///
/// Empty collections and absent values place no restriction on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub roles: BTreeSet<String>,
    pub techs: BTreeSet<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub search_text: String,
    pub sort_mode: Option<SortMode>,
}

impl FilterCriteria {
    /// Returns `true` when the selection changed.
    pub fn set_role(&mut self, role: &str, selected: bool) -> bool {
        toggle(&mut self.roles, role, selected)
    }

    pub fn set_tech(&mut self, tech: &str, selected: bool) -> bool {
        toggle(&mut self.techs, tech, selected)
    }

    pub fn set_location(&mut self, value: &str) {
        self.location = non_empty(value);
    }

    pub fn set_experience(&mut self, value: &str) {
        self.experience = non_empty(value);
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_lowercase();
    }

    /// True when no filter narrows the record set. Sort mode is ignored.
    pub fn is_unrestricted(&self) -> bool {
        self.roles.is_empty()
            && self.techs.is_empty()
            && self.location.is_none()
            && self.experience.is_none()
            && self.search_text.is_empty()
    }

    /// Conjunction of the role, tech, location, experience, and search
    /// predicates, short-circuiting on the first failure.
    pub fn matches(&self, record: &JobRecord) -> bool {
        self.matches_role(record)
            && self.matches_tech(record)
            && self.matches_location(record)
            && self.matches_experience(record)
            && self.matches_search(record)
    }

    fn matches_role(&self, record: &JobRecord) -> bool {
        self.roles.is_empty() || self.roles.contains(&record.role)
    }

    // Substring match: a selected "Script" keeps a record tagged "JavaScript".
    fn matches_tech(&self, record: &JobRecord) -> bool {
        self.techs.is_empty()
            || self
                .techs
                .iter()
                .any(|tech| record.tags.iter().any(|tag| tag.contains(tech.as_str())))
    }

    fn matches_location(&self, record: &JobRecord) -> bool {
        self.location
            .as_deref()
            .map_or(true, |location| record.location == location)
    }

    fn matches_experience(&self, record: &JobRecord) -> bool {
        self.experience
            .as_deref()
            .map_or(true, |level| record.experience_level == level)
    }

    fn matches_search(&self, record: &JobRecord) -> bool {
        self.search_text.is_empty() || record.search_haystack().contains(&self.search_text)
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str, selected: bool) -> bool {
    if selected {
        set.insert(value.to_string())
    } else {
        set.remove(value)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

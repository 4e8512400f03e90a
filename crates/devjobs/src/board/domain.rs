use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a listing within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One listing on the board. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub tags: Vec<String>,
    pub role: String,
    pub location: String,
    pub experience_level: String,
    pub salary_text: String,
    pub original_index: usize,
}

impl JobRecord {
    /// Case-folded haystack used by the free-text search filter.
    pub fn search_haystack(&self) -> String {
        let tags = self.tags.join(" ");
        format!(
            "{} {} {} {}",
            self.title, self.company, self.description, tags
        )
        .to_lowercase()
    }

    /// Leading integer of the salary text, e.g. `"$120k - $160k"` gives 120.
    pub fn salary_floor(&self) -> u64 {
        extract_salary(&self.salary_text)
    }
}

/// First run of ASCII digits in `text`, or 0 when there is none. Runs too
/// long for a `u64` saturate.
pub fn extract_salary(text: &str) -> u64 {
    text.split(|ch: char| !ch.is_ascii_digit())
        .find(|run| !run.is_empty())
        .map(|run| run.parse().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    Newest,
    Oldest,
    Salary,
    Company,
}

impl SortMode {
    pub const fn ordered() -> [Self; 4] {
        [Self::Newest, Self::Oldest, Self::Salary, Self::Company]
    }

    pub const fn value(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Salary => "salary",
            Self::Company => "company",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::Salary => "Highest Salary",
            Self::Company => "Company A-Z",
        }
    }

    /// Parses a select-box value. Unknown values yield `None`, which leaves
    /// ordering untouched.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|mode| mode.value().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

//! Filtering, sorting, and simulated actions for the listing board.

pub mod actions;
pub mod catalog;
pub mod criteria;
pub mod debounce;
pub mod domain;
mod engine;
pub mod notify;
pub mod sort;
pub mod view;

pub use actions::{ActionTimings, ApplyOutcome, ApplyStatus, BoardActions, LoadMoreOutcome};
pub use catalog::{CatalogError, JobCatalog};
pub use criteria::FilterCriteria;
pub use debounce::{coalesce, Debouncer, DEFAULT_SEARCH_DEBOUNCE};
pub use domain::{JobId, JobRecord, SortMode};
pub use engine::{recompute, FilterEngine};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier};
pub use view::{count_label, BoardRenderer, BoardView, RevealPlan};

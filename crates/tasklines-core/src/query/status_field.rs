use std::cmp::Ordering;

use super::{Comparator, Field, FilterInstructions};
use crate::task::Task;

/// Filters on whether a task is done, sorts on status name.
pub struct StatusField {
    filters: FilterInstructions,
}

impl StatusField {
    pub fn new() -> Self {
        let mut filters = FilterInstructions::new();
        filters.add("done", |task| task.is_done());
        filters.add("not done", |task| !task.is_done());
        Self { filters }
    }
}

impl Default for StatusField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for StatusField {
    fn field_name(&self) -> &'static str {
        "status"
    }

    fn filter_instructions(&self) -> &FilterInstructions {
        &self.filters
    }

    fn supports_sorting(&self) -> bool {
        true
    }

    fn comparator(&self) -> Option<Comparator> {
        Some(compare_by_status_name)
    }
}

/// Descending by status name; equal names compare equal.
fn compare_by_status_name(a: &Task, b: &Task) -> Ordering {
    b.status.name.cmp(&a.status.name)
}

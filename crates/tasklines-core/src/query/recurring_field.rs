use super::{Field, FilterInstructions};

/// Filters on whether a task has a recurrence rule. Not sortable.
pub struct RecurringField {
    filters: FilterInstructions,
}

impl RecurringField {
    pub fn new() -> Self {
        let mut filters = FilterInstructions::new();
        filters.add("is recurring", |task| task.is_recurring());
        filters.add("is not recurring", |task| !task.is_recurring());
        filters.add("not recurring", |task| !task.is_recurring());
        Self { filters }
    }
}

impl Default for RecurringField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for RecurringField {
    fn field_name(&self) -> &'static str {
        "recurring"
    }

    fn filter_instructions(&self) -> &FilterInstructions {
        &self.filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::Recurrence;
    use crate::task::Task;

    #[test]
    fn recurring_filters() {
        let field = RecurringField::new();
        let recurring = Task::new("r").with_recurrence(Recurrence::parse("every year").ok());
        let once = Task::new("o");

        let is = field.create_filter("is recurring").unwrap();
        assert!(is.matches(&recurring));
        assert!(!is.matches(&once));

        let not = field.create_filter("not recurring").unwrap();
        assert!(not.matches(&once));
    }

    #[test]
    fn recurring_field_cannot_sort() {
        let field = RecurringField::new();
        assert!(!field.supports_sorting());
        assert!(field.create_sorter(false).is_none());
    }
}

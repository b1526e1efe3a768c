//! Checklist task snapshot.
//!
//! A [`Task`] is an immutable value built once from a parsed source line.
//! Nothing mutates a task in place: every change goes through one of the
//! `with_*` builders, which clone the task and override a subset of its
//! fields. The verbatim source line, its indentation and its list marker
//! are carried across every clone.

pub mod completion;
pub mod transition;

pub use completion::{handle_on_completion, is_first_time_completion};
pub use transition::{handle_new_status, handle_new_status_with_options, TransitionOptions};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clock::Clock;
use crate::on_completion::OnCompletionAction;
use crate::recurrence::Recurrence;
use crate::status::Status;

/// Every date a task can carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TaskDates {
    pub created: Option<NaiveDate>,
    pub start: Option<NaiveDate>,
    pub scheduled: Option<NaiveDate>,
    pub due: Option<NaiveDate>,
    pub done: Option<NaiveDate>,
    pub cancelled: Option<NaiveDate>,
}

impl TaskDates {
    /// True when none of the dates is set.
    pub fn is_empty(&self) -> bool {
        *self == TaskDates::default()
    }
}

/// Where a task was read from. Only persistence looks at this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TaskLocation {
    pub path: PathBuf,
    /// Zero-based line index in the document.
    pub line_number: usize,
    /// Text of the closest heading above the task, without the `#`s.
    pub preceding_header: Option<String>,
}

impl TaskLocation {
    pub fn new(path: impl Into<PathBuf>, line_number: usize) -> Self {
        TaskLocation {
            path: path.into(),
            line_number,
            preceding_header: None,
        }
    }

    pub fn with_preceding_header(mut self, header: Option<String>) -> Self {
        self.preceding_header = header;
        self
    }
}

/// One checklist item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Free text after the checkbox, with trailing fields removed
    pub description: String,
    pub status: Status,
    pub dates: TaskDates,
    pub recurrence: Option<Recurrence>,
    pub on_completion: OnCompletionAction,
    /// The source line exactly as read
    pub original_markdown: String,
    /// Leading whitespace and blockquote markers before the list marker
    pub indentation: String,
    /// `-`, `*`, `+` or an ordered marker such as `1.`
    pub list_marker: String,
    pub location: TaskLocation,
}

impl Task {
    /// Create an unindented `- [ ]` task that is not tied to a document.
    pub fn new(description: impl Into<String>) -> Self {
        let mut task = Task {
            description: description.into(),
            status: Status::make_todo(),
            dates: TaskDates::default(),
            recurrence: None,
            on_completion: OnCompletionAction::None,
            original_markdown: String::new(),
            indentation: String::new(),
            list_marker: "-".to_string(),
            location: TaskLocation::default(),
        };
        task.original_markdown = task.to_markdown();
        task
    }

    pub fn with_status(&self, status: Status) -> Task {
        Task {
            status,
            ..self.clone()
        }
    }

    pub fn with_dates(&self, dates: TaskDates) -> Task {
        Task {
            dates,
            ..self.clone()
        }
    }

    pub fn with_description(&self, description: impl Into<String>) -> Task {
        Task {
            description: description.into(),
            ..self.clone()
        }
    }

    pub fn with_recurrence(&self, recurrence: Option<Recurrence>) -> Task {
        Task {
            recurrence,
            ..self.clone()
        }
    }

    pub fn with_on_completion(&self, on_completion: OnCompletionAction) -> Task {
        Task {
            on_completion,
            ..self.clone()
        }
    }

    pub fn with_location(&self, location: TaskLocation) -> Task {
        Task {
            location,
            ..self.clone()
        }
    }

    pub fn with_created_date(&self, created: Option<NaiveDate>) -> Task {
        self.with_dates(TaskDates {
            created,
            ..self.dates
        })
    }

    pub fn with_start_date(&self, start: Option<NaiveDate>) -> Task {
        self.with_dates(TaskDates {
            start,
            ..self.dates
        })
    }

    pub fn with_scheduled_date(&self, scheduled: Option<NaiveDate>) -> Task {
        self.with_dates(TaskDates {
            scheduled,
            ..self.dates
        })
    }

    pub fn with_due_date(&self, due: Option<NaiveDate>) -> Task {
        self.with_dates(TaskDates { due, ..self.dates })
    }

    pub fn with_done_date(&self, done: Option<NaiveDate>) -> Task {
        self.with_dates(TaskDates { done, ..self.dates })
    }

    pub fn with_cancelled_date(&self, cancelled: Option<NaiveDate>) -> Task {
        self.with_dates(TaskDates {
            cancelled,
            ..self.dates
        })
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Tasks that should replace this one after moving to `new_status`.
    pub fn handle_new_status(&self, new_status: Status, clock: &dyn Clock) -> Vec<Task> {
        handle_new_status(self, new_status, clock)
    }

    /// Transition to `new_status`, then apply this task's on-completion action.
    pub fn apply_status(&self, new_status: Status, clock: &dyn Clock) -> Vec<Task> {
        self.apply_status_with_options(new_status, clock, &TransitionOptions::default())
    }

    pub fn apply_status_with_options(
        &self,
        new_status: Status,
        clock: &dyn Clock,
        options: &TransitionOptions,
    ) -> Vec<Task> {
        let transitioned = handle_new_status_with_options(self, new_status, clock, options);
        handle_on_completion(self, transitioned)
    }

    /// Render the task as a Markdown checklist line.
    pub fn to_markdown(&self) -> String {
        crate::markdown::serialize_task(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn task_creation() {
        let task = Task::new("Buy milk");
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.status.status_type, StatusType::Todo);
        assert!(task.dates.is_empty());
        assert_eq!(task.original_markdown, "- [ ] Buy milk");
    }

    #[test]
    fn with_status_keeps_everything_else() {
        let task = Task::new("Write report").with_due_date(Some(date(2024, 2, 10)));
        let done = task.with_status(Status::make_done());

        assert_eq!(done.status, Status::make_done());
        assert_eq!(done.dates, task.dates);
        assert_eq!(done.description, task.description);
        assert_eq!(done.original_markdown, task.original_markdown);
        // the source value is untouched
        assert_eq!(task.status, Status::make_todo());
    }

    #[test]
    fn date_builders_override_a_single_field() {
        let task = Task::new("Plan")
            .with_start_date(Some(date(2024, 1, 1)))
            .with_scheduled_date(Some(date(2024, 1, 2)))
            .with_due_date(Some(date(2024, 1, 3)));
        let moved = task.with_scheduled_date(Some(date(2024, 1, 5)));

        assert_eq!(moved.dates.start, Some(date(2024, 1, 1)));
        assert_eq!(moved.dates.scheduled, Some(date(2024, 1, 5)));
        assert_eq!(moved.dates.due, Some(date(2024, 1, 3)));
    }

    #[test]
    fn task_serialization() {
        let task = Task::new("Serialize me")
            .with_on_completion(OnCompletionAction::Delete)
            .with_recurrence(Recurrence::parse("every week").ok());

        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, task);
    }
}

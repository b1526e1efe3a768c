//! Checkbox status model.
//!
//! A [`Status`] is what sits between the brackets of a checklist item. Its
//! indicator and name are cosmetic and user-configurable; only the
//! [`StatusType`] drives lifecycle decisions.

pub mod registry;

pub use registry::StatusRegistry;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse lifecycle classification of a status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusType {
    Todo,
    InProgress,
    Done,
    Cancelled,
    NonTask,
}

impl StatusType {
    /// Upper-case label as written in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusType::Todo => "TODO",
            StatusType::InProgress => "IN_PROGRESS",
            StatusType::Done => "DONE",
            StatusType::Cancelled => "CANCELLED",
            StatusType::NonTask => "NON_TASK",
        }
    }
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One checkbox state: display indicator, display name and lifecycle type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    /// Glyph between the brackets, e.g. `' '`, `'x'`, `'/'`.
    pub indicator: char,
    /// Human-readable label.
    pub name: String,
    /// Indicator of the status a toggle moves to.
    pub next_indicator: char,
    /// Lifecycle type; the only field that matters for transitions.
    pub status_type: StatusType,
}

impl Status {
    pub fn new(
        indicator: char,
        name: impl Into<String>,
        next_indicator: char,
        status_type: StatusType,
    ) -> Self {
        Status {
            indicator,
            name: name.into(),
            next_indicator,
            status_type,
        }
    }

    pub fn make_todo() -> Self {
        Status::new(' ', "Todo", 'x', StatusType::Todo)
    }

    pub fn make_in_progress() -> Self {
        Status::new('/', "In Progress", 'x', StatusType::InProgress)
    }

    pub fn make_done() -> Self {
        Status::new('x', "Done", ' ', StatusType::Done)
    }

    pub fn make_cancelled() -> Self {
        Status::new('-', "Cancelled", ' ', StatusType::Cancelled)
    }

    pub fn make_non_task() -> Self {
        Status::new('Q', "Non-task", 'A', StatusType::NonTask)
    }

    /// Status used for an indicator nobody has configured.
    pub fn make_unknown(indicator: char) -> Self {
        Status::new(indicator, "Unknown", 'x', StatusType::Todo)
    }

    /// Whether this status closes the task.
    pub fn is_done(&self) -> bool {
        self.status_type == StatusType::Done
    }

    /// Two statuses are the same lifecycle state iff their types match,
    /// whatever their indicators or names.
    pub fn same_lifecycle(&self, other: &Status) -> bool {
        self.status_type == other.status_type
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::make_todo()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.indicator, self.name, self.status_type)
    }
}

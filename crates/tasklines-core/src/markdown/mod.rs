//! Markdown checklist line parsing and rendering.
//!
//! Lines look like `{indent}{marker} [{c}] {description} {fields...}` where
//! the trailing fields are emoji-flagged dates, a `🔁` recurrence rule and a
//! `🏁` on-completion action.

mod parser;
mod serializer;

pub use parser::{parse_task_line, split_task_line, TaskLineParts};
pub use serializer::{serialize_task, to_lines};

pub const DONE_FLAG: &str = "✅";
pub const CANCELLED_FLAG: &str = "❌";
pub const DUE_FLAG: &str = "📅";
pub const SCHEDULED_FLAG: &str = "⏳";
pub const START_FLAG: &str = "🛫";
pub const CREATED_FLAG: &str = "➕";
pub const RECURRENCE_FLAG: &str = "🔁";

/// Date format used in every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

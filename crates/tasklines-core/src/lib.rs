//! # Tasklines Core Library
//!
//! Status transitions, recurrence and on-completion actions for Markdown
//! checklist tasks. The `tasklines` CLI binary is a thin layer over this
//! library.
//!
//! ## Architecture
//!
//! - **Transition engine**: [`handle_new_status`] turns one task and a new
//!   status into the tasks that replace it, creating the next occurrence of
//!   a recurring task when it is completed
//! - **Completion actions**: [`handle_on_completion`] runs the task's `🏁`
//!   action, but only on its first completion
//! - **Markdown**: line parser and serializer for `- [ ] ...` items
//! - **Query**: filter and sort fields over parsed tasks
//! - **Storage**: TOML configuration and in-place document updates
//!
//! ## Key Components
//!
//! - [`Task`]: Immutable task snapshot with `with_*` builders
//! - [`Status`] / [`StatusRegistry`]: Checkbox states and their lifecycle types
//! - [`Clock`]: Source of "today"
//! - [`Document`]: Markdown file with task lookup and replacement
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod markdown;
pub mod on_completion;
pub mod postpone;
pub mod query;
pub mod recurrence;
pub mod status;
pub mod storage;
pub mod task;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{
    ConfigError, CoreError, DocumentError, PostponeError, QueryError, RecurrenceError,
};
pub use on_completion::OnCompletionAction;
pub use postpone::{HappensDate, PostponeOption, PostponedTask, TimeUnit};
pub use query::{Field, Query};
pub use recurrence::Recurrence;
pub use status::{Status, StatusRegistry, StatusType};
pub use storage::{Config, Document};
pub use task::{
    handle_new_status, handle_on_completion, Task, TaskDates, TaskLocation, TransitionOptions,
};

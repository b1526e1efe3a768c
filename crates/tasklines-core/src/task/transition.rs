//! Status transition engine.
//!
//! Given a task and a requested status, decide which tasks replace the
//! task's source line:
//!
//! ```text
//!   current  new       result
//!   -------  --------  -----------------------------------------------
//!   DONE     DONE      [task with new status]          (re-confirmation)
//!   !DONE    DONE      [completed]                     (no recurrence)
//!   !DONE    DONE      [next occurrence, completed]    (recurring)
//!   any      !DONE     [task with new status]
//! ```
//!
//! Recurrence and on-completion behaviour only ever run on a first-time
//! completion.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Task;
use crate::clock::Clock;
use crate::status::{Status, StatusType};

/// Knobs for the transition engine that come from configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TransitionOptions {
    /// Stamp the next occurrence of a recurring task with today's created date.
    pub set_created_date: bool,
}

/// Tasks that replace `task` once it moves to `new_status`, in document order.
pub fn handle_new_status(task: &Task, new_status: Status, clock: &dyn Clock) -> Vec<Task> {
    handle_new_status_with_options(task, new_status, clock, &TransitionOptions::default())
}

pub fn handle_new_status_with_options(
    task: &Task,
    new_status: Status,
    clock: &dyn Clock,
    options: &TransitionOptions,
) -> Vec<Task> {
    let today = clock.today();

    if task.status.is_done() && new_status.is_done() {
        debug!(
            from = %task.status.indicator,
            to = %new_status.indicator,
            "task already done, re-confirming status only"
        );
        return vec![task.with_status(new_status)];
    }

    if !new_status.is_done() {
        debug!(
            from = %task.status.status_type,
            to = %new_status.status_type,
            "non-completing transition"
        );
        return vec![task.with_status(new_status)];
    }

    let completed = task.with_status(new_status).with_done_date(Some(today));

    let Some(recurrence) = &task.recurrence else {
        debug!(%today, "first-time completion");
        return vec![completed];
    };

    let mut next_dates = recurrence.next_dates(&task.dates, today);
    if options.set_created_date {
        next_dates.created = Some(today);
    }
    let next = task
        .with_status(next_occurrence_status(&task.status))
        .with_dates(next_dates);

    debug!(
        %today,
        rule = recurrence.rule_text(),
        next_due = ?next.dates.due,
        "first-time completion of recurring task"
    );
    vec![next, completed]
}

/// Open status for the next occurrence: the task's own status when it was
/// still to-do, otherwise a plain to-do.
fn next_occurrence_status(previous: &Status) -> Status {
    if previous.status_type == StatusType::Todo {
        previous.clone()
    } else {
        Status::make_todo()
    }
}

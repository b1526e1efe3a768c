//! On-completion action engine.
//!
//! Runs after the transition engine and applies the original task's
//! on-completion action to its output. The action only fires on a
//! first-time completion, so toggling an already-done task never deletes
//! it again.

use tracing::debug;

use super::Task;
use crate::on_completion::OnCompletionAction;

/// True iff `original` was not done and the transition produced a done task.
pub fn is_first_time_completion(original: &Task, transitioned: &[Task]) -> bool {
    !original.is_done() && transitioned.iter().any(Task::is_done)
}

/// Apply `original`'s on-completion action to the transition result.
pub fn handle_on_completion(original: &Task, transitioned: Vec<Task>) -> Vec<Task> {
    if !is_first_time_completion(original, &transitioned) {
        return transitioned;
    }

    match original.on_completion {
        OnCompletionAction::None => transitioned,
        OnCompletionAction::Delete => {
            let before = transitioned.len();
            let kept: Vec<Task> = transitioned.into_iter().filter(|t| !t.is_done()).collect();
            debug!(removed = before - kept.len(), "on-completion delete");
            kept
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::recurrence::Recurrence;
    use crate::status::Status;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2024, 2, 11).unwrap())
    }

    fn deleting_task() -> Task {
        Task::new("Take out bins").with_on_completion(OnCompletionAction::Delete)
    }

    #[test]
    fn delete_removes_completed_task() {
        let task = deleting_task();
        let transitioned = task.handle_new_status(Status::make_done(), &clock());
        assert!(handle_on_completion(&task, transitioned).is_empty());
    }

    #[test]
    fn delete_keeps_next_occurrence() {
        let task = deleting_task().with_recurrence(Recurrence::parse("every week").ok());
        let transitioned = task.handle_new_status(Status::make_done(), &clock());
        let result = handle_on_completion(&task, transitioned.clone());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0], transitioned[0]);
        assert!(!result[0].is_done());
    }

    #[test]
    fn delete_does_not_fire_on_redundant_completion() {
        let task = deleting_task().with_status(Status::make_done());
        let transitioned = task.handle_new_status(Status::make_done(), &clock());
        assert!(!is_first_time_completion(&task, &transitioned));
        assert_eq!(handle_on_completion(&task, transitioned.clone()), transitioned);
    }

    #[test]
    fn delete_does_not_fire_on_non_completing_transition() {
        let task = deleting_task();
        let transitioned = task.handle_new_status(Status::make_in_progress(), &clock());
        assert_eq!(handle_on_completion(&task, transitioned.clone()), transitioned);
    }

    #[test]
    fn none_action_passes_result_through() {
        let task = Task::new("Keep me");
        let transitioned = task.handle_new_status(Status::make_done(), &clock());
        assert_eq!(handle_on_completion(&task, transitioned.clone()), transitioned);
    }
}

use chrono::NaiveDate;

use super::{
    CANCELLED_FLAG, CREATED_FLAG, DATE_FORMAT, DONE_FLAG, DUE_FLAG, RECURRENCE_FLAG,
    SCHEDULED_FLAG, START_FLAG,
};
use crate::on_completion::ON_COMPLETION_FLAG;
use crate::task::Task;

/// Render a task back to a checklist line.
///
/// The indentation and list marker captured at parse time are reused; the
/// checkbox and every trailing field come from the task's current values.
pub fn serialize_task(task: &Task) -> String {
    let mut body = task.description.clone();

    if let Some(recurrence) = &task.recurrence {
        push_field(&mut body, RECURRENCE_FLAG, recurrence.rule_text());
    }
    if let Some(token) = task.on_completion.token() {
        push_field(&mut body, ON_COMPLETION_FLAG, token);
    }

    let dates = &task.dates;
    for (flag, date) in [
        (CREATED_FLAG, dates.created),
        (START_FLAG, dates.start),
        (SCHEDULED_FLAG, dates.scheduled),
        (DUE_FLAG, dates.due),
        (CANCELLED_FLAG, dates.cancelled),
        (DONE_FLAG, dates.done),
    ] {
        if let Some(date) = date {
            push_field(&mut body, flag, &format_date(date));
        }
    }

    let prefix = format!(
        "{}{} [{}]",
        task.indentation, task.list_marker, task.status.indicator
    );
    let body = body.trim_start();
    if body.is_empty() {
        prefix
    } else {
        format!("{prefix} {body}")
    }
}

/// Render several tasks, one line each.
pub fn to_lines(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(serialize_task).collect()
}

fn push_field(body: &mut String, flag: &str, value: &str) {
    body.push(' ');
    body.push_str(flag);
    body.push(' ');
    body.push_str(value);
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parse_task_line;
    use crate::on_completion::OnCompletionAction;
    use crate::status::{Status, StatusRegistry};
    use crate::task::TaskLocation;

    fn reparse(line: &str) -> String {
        parse_task_line(line, TaskLocation::default(), &StatusRegistry::core())
            .unwrap()
            .to_markdown()
    }

    #[test]
    fn canonical_lines_survive_a_round_trip() {
        for line in [
            "- [ ] Plain",
            "- [x] Done 📅 2024-02-10 ✅ 2024-02-11",
            "    - [ ] Indented 🏁 delete",
            "> - [/] Quoted 🔁 every week ⏳ 2024-03-01",
            "1. [-] Numbered ❌ 2024-01-05",
        ] {
            assert_eq!(reparse(line), line);
        }
    }

    #[test]
    fn fields_are_written_in_canonical_order() {
        assert_eq!(
            reparse("- [ ] Mixed 📅 2024-02-10 🏁 delete 🔁 every day"),
            "- [ ] Mixed 🔁 every day 🏁 delete 📅 2024-02-10"
        );
    }

    #[test]
    fn inert_action_is_not_rendered() {
        let task = Task::new("Nothing happens").with_on_completion(OnCompletionAction::None);
        assert_eq!(serialize_task(&task), "- [ ] Nothing happens");
    }

    #[test]
    fn status_indicator_is_rewritten() {
        let task = Task::new("Flip").with_status(Status::make_done());
        assert_eq!(serialize_task(&task), "- [x] Flip");
    }

    #[test]
    fn empty_description_has_no_trailing_space() {
        assert_eq!(serialize_task(&Task::new("")), "- [ ]");
    }
}

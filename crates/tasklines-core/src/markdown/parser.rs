use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::DATE_FORMAT;
use crate::on_completion::OnCompletionAction;
use crate::recurrence::Recurrence;
use crate::status::StatusRegistry;
use crate::task::{Task, TaskDates, TaskLocation};

static TASK_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([\s>]*)([-*+]|[0-9]+[.)])\s+\[(.)\]\s*(.*)$").expect("valid task line regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Done,
    Cancelled,
    Due,
    Scheduled,
    Start,
    Created,
    Recurrence,
    OnCompletion,
}

static TRAILING_FIELDS: Lazy<Vec<(FieldKind, Regex)>> = Lazy::new(|| {
    const DATE: &str = r"\x{FE0F}?\s*(\d{4}-\d{2}-\d{2})$";
    let field = |kind: FieldKind, pattern: String| {
        (kind, Regex::new(&pattern).expect("valid trailing field regex"))
    };
    vec![
        field(FieldKind::Done, format!("✅{DATE}")),
        field(FieldKind::Cancelled, format!("❌{DATE}")),
        field(FieldKind::Due, format!("(?:📅|📆|🗓){DATE}")),
        field(FieldKind::Scheduled, format!("(?:⏳|⌛){DATE}")),
        field(FieldKind::Start, format!("🛫{DATE}")),
        field(FieldKind::Created, format!("➕{DATE}")),
        field(
            FieldKind::Recurrence,
            r"🔁\x{FE0F}?\s*([a-zA-Z0-9, !]+)$".to_string(),
        ),
        field(
            FieldKind::OnCompletion,
            r"🏁\x{FE0F}?\s*([a-zA-Z]*)$".to_string(),
        ),
    ]
});

/// Upper bound on trailing fields read from one line.
const MAX_TRAILING_FIELDS: usize = 20;

/// The pieces of a checklist line before field parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLineParts {
    pub indentation: String,
    pub list_marker: String,
    pub indicator: char,
    pub body: String,
}

/// Split a line into prefix, checkbox indicator and body, or `None` when
/// the line is not a checklist item.
pub fn split_task_line(line: &str) -> Option<TaskLineParts> {
    let caps = TASK_LINE_RE.captures(line)?;
    let indicator = caps.get(3)?.as_str().chars().next()?;
    Some(TaskLineParts {
        indentation: caps.get(1).map_or("", |m| m.as_str()).to_string(),
        list_marker: caps.get(2)?.as_str().to_string(),
        indicator,
        body: caps.get(4).map_or("", |m| m.as_str()).to_string(),
    })
}

/// Parse one source line into a [`Task`].
///
/// Trailing fields are read right to left. Reading stops at the first field
/// that is invalid or repeated, leaving it and everything before it in the
/// description.
pub fn parse_task_line(
    line: &str,
    location: TaskLocation,
    registry: &StatusRegistry,
) -> Option<Task> {
    let parts = split_task_line(line)?;
    let status = registry.by_indicator(parts.indicator);

    let mut body = parts.body.trim_end().to_string();
    let mut dates = TaskDates::default();
    let mut recurrence: Option<Recurrence> = None;
    let mut on_completion: Option<OnCompletionAction> = None;

    for _ in 0..MAX_TRAILING_FIELDS {
        let Some((kind, start, value)) = match_trailing_field(&body) else {
            break;
        };

        let accepted = match kind {
            FieldKind::Recurrence => {
                recurrence.is_none()
                    && match Recurrence::parse(&value) {
                        Ok(rule) => {
                            recurrence = Some(rule);
                            true
                        }
                        Err(e) => {
                            warn!(
                                line = location.line_number,
                                error = %e,
                                "leaving recurrence in description"
                            );
                            false
                        }
                    }
            }
            FieldKind::OnCompletion => {
                on_completion.is_none() && {
                    on_completion = Some(OnCompletionAction::from_token(&value));
                    true
                }
            }
            date_kind => match date_slot(&mut dates, date_kind) {
                Some(slot) if slot.is_none() => {
                    match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
                        Ok(date) => {
                            *slot = Some(date);
                            true
                        }
                        Err(_) => {
                            warn!(
                                line = location.line_number,
                                value = %value,
                                "leaving invalid date in description"
                            );
                            false
                        }
                    }
                }
                _ => false,
            },
        };

        if !accepted {
            break;
        }
        body.truncate(start);
        let kept = body.trim_end().len();
        body.truncate(kept);
    }

    Some(Task {
        description: body,
        status,
        dates,
        recurrence,
        on_completion: on_completion.unwrap_or_default(),
        original_markdown: line.to_string(),
        indentation: parts.indentation,
        list_marker: parts.list_marker,
        location,
    })
}

fn match_trailing_field(body: &str) -> Option<(FieldKind, usize, String)> {
    TRAILING_FIELDS.iter().find_map(|(kind, re)| {
        let caps = re.captures(body)?;
        let whole = caps.get(0)?;
        let value = caps.get(1).map_or("", |m| m.as_str()).to_string();
        Some((*kind, whole.start(), value))
    })
}

fn date_slot(dates: &mut TaskDates, kind: FieldKind) -> Option<&mut Option<NaiveDate>> {
    match kind {
        FieldKind::Done => Some(&mut dates.done),
        FieldKind::Cancelled => Some(&mut dates.cancelled),
        FieldKind::Due => Some(&mut dates.due),
        FieldKind::Scheduled => Some(&mut dates.scheduled),
        FieldKind::Start => Some(&mut dates.start),
        FieldKind::Created => Some(&mut dates.created),
        FieldKind::Recurrence | FieldKind::OnCompletion => None,
    }
}

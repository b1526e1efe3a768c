//! Postponing a task's "happens" date.
//!
//! The date that moves is the first present of due, scheduled and start.
//! A task with none of them cannot be postponed; that is reported as
//! [`PostponeError::NoDate`] for the caller to show to the user.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::clock::Clock;
use crate::error::PostponeError;
use crate::task::Task;

/// Date fields that postponement may move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HappensDate {
    Due,
    Scheduled,
    Start,
}

impl HappensDate {
    /// Lower-case label, e.g. "due date".
    pub fn label(&self) -> &'static str {
        match self {
            HappensDate::Due => "due date",
            HappensDate::Scheduled => "scheduled date",
            HappensDate::Start => "start date",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            HappensDate::Due => "Due",
            HappensDate::Scheduled => "Scheduled",
            HappensDate::Start => "Start",
        }
    }

    pub fn get(&self, task: &Task) -> Option<NaiveDate> {
        match self {
            HappensDate::Due => task.dates.due,
            HappensDate::Scheduled => task.dates.scheduled,
            HappensDate::Start => task.dates.start,
        }
    }

    /// Clone of `task` with this field set to `date`.
    pub fn set(&self, task: &Task, date: NaiveDate) -> Task {
        match self {
            HappensDate::Due => task.with_due_date(Some(date)),
            HappensDate::Scheduled => task.with_scheduled_date(Some(date)),
            HappensDate::Start => task.with_start_date(Some(date)),
        }
    }
}

impl fmt::Display for HappensDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
}

impl TimeUnit {
    /// `date` moved forward by `amount` units; month steps clamp to the
    /// last day of a shorter month.
    pub fn advance(&self, date: NaiveDate, amount: u32) -> Option<NaiveDate> {
        match self {
            TimeUnit::Days => date.checked_add_days(Days::new(amount as u64)),
            TimeUnit::Weeks => date.checked_add_days(Days::new(7 * amount as u64)),
            TimeUnit::Months => date.checked_add_months(Months::new(amount)),
        }
    }

    /// Like [`TimeUnit::advance`], but a result past [`NaiveDate::MAX`]
    /// saturates to `date` itself and logs a warning.
    pub fn advance_or_keep(&self, date: NaiveDate, amount: u32) -> NaiveDate {
        self.advance(date, amount).unwrap_or_else(|| {
            warn!(%date, amount, unit = ?self, "postponed date out of range, keeping date");
            date
        })
    }

    /// "day" or "days" depending on `amount`.
    pub fn label(&self, amount: u32) -> &'static str {
        match (self, amount == 1) {
            (TimeUnit::Days, true) => "day",
            (TimeUnit::Days, false) => "days",
            (TimeUnit::Weeks, true) => "week",
            (TimeUnit::Weeks, false) => "weeks",
            (TimeUnit::Months, true) => "month",
            (TimeUnit::Months, false) => "months",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" => Ok(TimeUnit::Days),
            "week" | "weeks" => Ok(TimeUnit::Weeks),
            "month" | "months" => Ok(TimeUnit::Months),
            other => Err(format!("unknown time unit: {other}")),
        }
    }
}

/// One postponement choice offered to the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostponeOption {
    pub amount: u32,
    pub unit: TimeUnit,
    /// Count from today instead of from the task's current date.
    pub fixed: bool,
}

/// The standard choices: today, tomorrow, then 2-6 days, 1-3 weeks and a month later.
pub fn postpone_options() -> Vec<PostponeOption> {
    let fixed = |amount| PostponeOption {
        amount,
        unit: TimeUnit::Days,
        fixed: true,
    };
    let later = |amount, unit| PostponeOption {
        amount,
        unit,
        fixed: false,
    };

    let mut options = vec![fixed(0), fixed(1)];
    options.extend((2..=6).map(|n| later(n, TimeUnit::Days)));
    options.extend((1..=3).map(|n| later(n, TimeUnit::Weeks)));
    options.push(later(1, TimeUnit::Months));
    options
}

/// Result of a postponement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostponedTask {
    pub field: HappensDate,
    pub postponed_date: NaiveDate,
    pub task: Task,
}

/// The field postponement would move: due, else scheduled, else start.
pub fn date_field_to_postpone(task: &Task) -> Option<HappensDate> {
    [HappensDate::Due, HappensDate::Scheduled, HappensDate::Start]
        .into_iter()
        .find(|field| field.get(task).is_some())
}

/// Move `field` forward from its current value.
///
/// A date that would pass [`NaiveDate::MAX`] is left where it is.
pub fn create_postponed_task(
    task: &Task,
    field: HappensDate,
    unit: TimeUnit,
    amount: u32,
) -> Result<PostponedTask, PostponeError> {
    let current = field.get(task).ok_or(PostponeError::NoDate)?;
    let postponed_date = unit.advance_or_keep(current, amount);
    Ok(PostponedTask {
        field,
        postponed_date,
        task: field.set(task, postponed_date),
    })
}

/// Set `field` to `amount` units after today, saturating like
/// [`create_postponed_task`].
pub fn create_fixed_date_task(
    task: &Task,
    field: HappensDate,
    unit: TimeUnit,
    amount: u32,
    clock: &dyn Clock,
) -> Result<PostponedTask, PostponeError> {
    field.get(task).ok_or(PostponeError::NoDate)?;
    let today = clock.today();
    let postponed_date = unit.advance_or_keep(today, amount);
    Ok(PostponedTask {
        field,
        postponed_date,
        task: field.set(task, postponed_date),
    })
}

/// Pick the field and apply `option`.
pub fn postpone(
    task: &Task,
    option: PostponeOption,
    clock: &dyn Clock,
) -> Result<PostponedTask, PostponeError> {
    let field = date_field_to_postpone(task).ok_or(PostponeError::NoDate)?;
    if option.fixed {
        create_fixed_date_task(task, field, option.unit, option.amount, clock)
    } else {
        create_postponed_task(task, field, option.unit, option.amount)
    }
}

fn format_day(date: NaiveDate) -> String {
    date.format("%a %-d %b").to_string()
}

/// Title for a relative postponement choice.
pub fn postpone_menu_item_title(task: &Task, amount: u32, unit: TimeUnit) -> String {
    let amount_text = format!("{amount} {}", unit.label(amount));
    let Some(field) = date_field_to_postpone(task) else {
        return format!("Postpone by {amount_text}");
    };
    match create_postponed_task(task, field, unit, amount) {
        Ok(postponed) => format!(
            "Postpone {} by {amount_text}, to {}",
            field.label(),
            format_day(postponed.postponed_date)
        ),
        Err(_) => format!("Postpone by {amount_text}"),
    }
}

/// Title for a choice counted from today.
pub fn fixed_date_menu_item_title(
    task: &Task,
    amount: u32,
    unit: TimeUnit,
    clock: &dyn Clock,
) -> String {
    let field = date_field_to_postpone(task).unwrap_or(HappensDate::Due);
    let when = match (amount, unit) {
        (0, _) => "today".to_string(),
        (1, TimeUnit::Days) => "tomorrow".to_string(),
        _ => format!("in {amount} {}", unit.label(amount)),
    };
    let today = clock.today();
    let date = unit.advance_or_keep(today, amount);
    format!("{} {when}, on {}", field.title(), format_day(date))
}

/// Message shown after a successful postponement.
pub fn postponement_success_message(postponed_date: NaiveDate, field: HappensDate) -> String {
    format!("Task's {} changed to {}", field.label(), format_day(postponed_date))
}

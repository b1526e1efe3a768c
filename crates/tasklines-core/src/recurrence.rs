//! Recurrence rules and next-occurrence date generation.
//!
//! A rule is written after the `🔁` flag, e.g. `every day`, `every 2 weeks`
//! or `every month when done`. Plain rules recur from the task's own anchor
//! date; `when done` rules recur from the day the task was completed.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::RecurrenceError;
use crate::task::TaskDates;

/// One step between occurrences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Days(u32),
    Weeks(u32),
    Months(u32),
    Years(u32),
}

impl Cadence {
    /// Advance `date` by one step. Month and year steps clamp to the last
    /// day of a shorter month.
    ///
    /// A step past [`NaiveDate::MAX`] saturates: the date is returned
    /// unchanged and a warning is logged.
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        let next = match *self {
            Cadence::Days(n) => date.checked_add_days(Days::new(n as u64)),
            Cadence::Weeks(n) => date.checked_add_days(Days::new(7 * n as u64)),
            Cadence::Months(n) => date.checked_add_months(Months::new(n)),
            Cadence::Years(n) => n
                .checked_mul(12)
                .and_then(|months| date.checked_add_months(Months::new(months))),
        };
        next.unwrap_or_else(|| {
            warn!(%date, cadence = ?self, "recurrence step out of range, keeping date");
            date
        })
    }
}

/// What the next occurrence is computed from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceBase {
    /// From the task's existing due/scheduled/start date.
    #[default]
    Relative,
    /// From the calendar day of completion (`when done`).
    Fixed,
}

/// A parsed recurrence rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recurrence {
    rule_text: String,
    cadence: Cadence,
    base: RecurrenceBase,
}

impl Recurrence {
    /// Parse a rule such as `every 3 days when done`.
    pub fn parse(text: &str) -> Result<Self, RecurrenceError> {
        let rule_text = text.trim().to_string();
        let lower = rule_text.to_lowercase();
        let mut words: Vec<&str> = lower.split_whitespace().collect();

        let base = if words.ends_with(&["when", "done"]) {
            words.truncate(words.len() - 2);
            RecurrenceBase::Fixed
        } else {
            RecurrenceBase::Relative
        };

        let unrecognised = || RecurrenceError::Unrecognised(rule_text.clone());

        let (interval, unit) = match words.as_slice() {
            ["every", unit] => (1, *unit),
            ["every", n, unit] => {
                let n: u32 = n.parse().map_err(|_| unrecognised())?;
                (n, *unit)
            }
            _ => return Err(unrecognised()),
        };
        if interval == 0 {
            return Err(RecurrenceError::ZeroInterval);
        }

        let cadence = match unit {
            "day" | "days" => Cadence::Days(interval),
            "week" | "weeks" => Cadence::Weeks(interval),
            "month" | "months" => Cadence::Months(interval),
            "year" | "years" => Cadence::Years(interval),
            _ => return Err(unrecognised()),
        };

        Ok(Recurrence {
            rule_text,
            cadence,
            base,
        })
    }

    /// The rule as the user wrote it.
    pub fn rule_text(&self) -> &str {
        &self.rule_text
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn base(&self) -> RecurrenceBase {
        self.base
    }

    /// The date the rule is anchored on: due, else scheduled, else start.
    pub fn reference_date(dates: &TaskDates) -> Option<NaiveDate> {
        dates.due.or(dates.scheduled).or(dates.start)
    }

    /// Dates for the next occurrence.
    ///
    /// The reference date moves one cadence step from its base (itself, or
    /// `today` for `when done` rules and for tasks without any anchor).
    /// Every other start/scheduled/due date keeps its day offset from the
    /// reference. `done` and `cancelled` are cleared; `created` is copied.
    pub fn next_dates(&self, dates: &TaskDates, today: NaiveDate) -> TaskDates {
        let reference = Self::reference_date(dates);
        let base = match (self.base, reference) {
            (RecurrenceBase::Relative, Some(reference)) => reference,
            _ => today,
        };
        let next_reference = self.cadence.advance(base);

        let shift = |date: Option<NaiveDate>| -> Option<NaiveDate> {
            let date = date?;
            let Some(reference) = reference else {
                return Some(date);
            };
            Some(
                next_reference
                    .checked_add_signed(date - reference)
                    .unwrap_or_else(|| {
                        warn!(%date, "shifted date out of range, keeping date");
                        date
                    }),
            )
        };

        TaskDates {
            created: dates.created,
            start: shift(dates.start),
            scheduled: shift(dates.scheduled),
            due: shift(dates.due),
            done: None,
            cancelled: None,
        }
    }
}

impl FromStr for Recurrence {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recurrence::parse(s)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_simple_rules() {
        let rule = Recurrence::parse("every day").unwrap();
        assert_eq!(rule.cadence(), Cadence::Days(1));
        assert_eq!(rule.base(), RecurrenceBase::Relative);

        let rule = Recurrence::parse("every 2 weeks").unwrap();
        assert_eq!(rule.cadence(), Cadence::Weeks(2));

        let rule = Recurrence::parse("Every Month when done").unwrap();
        assert_eq!(rule.cadence(), Cadence::Months(1));
        assert_eq!(rule.base(), RecurrenceBase::Fixed);
        assert_eq!(rule.rule_text(), "Every Month when done");
    }

    #[test]
    fn rejects_unknown_rules() {
        assert!(matches!(
            Recurrence::parse("every blue moon"),
            Err(RecurrenceError::Unrecognised(_))
        ));
        assert!(matches!(
            Recurrence::parse("daily"),
            Err(RecurrenceError::Unrecognised(_))
        ));
        assert_eq!(
            Recurrence::parse("every 0 days"),
            Err(RecurrenceError::ZeroInterval)
        );
    }

    #[test]
    fn month_cadence_clamps_to_month_end() {
        assert_eq!(Cadence::Months(1).advance(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(Cadence::Years(1).advance(date(2024, 2, 29)), date(2025, 2, 28));
    }

    #[test]
    fn relative_rule_moves_from_due_date() {
        let rule = Recurrence::parse("every day").unwrap();
        let dates = TaskDates {
            due: Some(date(2024, 2, 10)),
            ..Default::default()
        };
        let next = rule.next_dates(&dates, date(2024, 2, 20));
        assert_eq!(next.due, Some(date(2024, 2, 11)));
    }

    #[test]
    fn fixed_rule_moves_from_today() {
        let rule = Recurrence::parse("every week when done").unwrap();
        let dates = TaskDates {
            due: Some(date(2024, 2, 1)),
            ..Default::default()
        };
        let next = rule.next_dates(&dates, date(2024, 2, 11));
        assert_eq!(next.due, Some(date(2024, 2, 18)));
    }

    #[test]
    fn offsets_between_dates_are_kept() {
        let rule = Recurrence::parse("every month").unwrap();
        let dates = TaskDates {
            start: Some(date(2024, 3, 1)),
            scheduled: Some(date(2024, 3, 8)),
            due: Some(date(2024, 3, 10)),
            done: Some(date(2024, 3, 9)),
            ..Default::default()
        };
        let next = rule.next_dates(&dates, date(2024, 3, 9));
        assert_eq!(next.due, Some(date(2024, 4, 10)));
        assert_eq!(next.scheduled, Some(date(2024, 4, 8)));
        assert_eq!(next.start, Some(date(2024, 4, 1)));
        assert_eq!(next.done, None);
    }

    #[test]
    fn scheduled_is_reference_without_due() {
        let rule = Recurrence::parse("every 3 days").unwrap();
        let dates = TaskDates {
            scheduled: Some(date(2024, 5, 1)),
            start: Some(date(2024, 4, 30)),
            ..Default::default()
        };
        let next = rule.next_dates(&dates, date(2024, 5, 2));
        assert_eq!(next.scheduled, Some(date(2024, 5, 4)));
        assert_eq!(next.start, Some(date(2024, 5, 3)));
    }

    #[test]
    fn no_dates_stay_empty() {
        let rule = Recurrence::parse("every day").unwrap();
        let created = Some(date(2024, 1, 1));
        let dates = TaskDates {
            created,
            ..Default::default()
        };
        let next = rule.next_dates(&dates, date(2024, 2, 11));
        assert_eq!(next.created, created);
        assert!(next.due.is_none() && next.scheduled.is_none() && next.start.is_none());
    }

    #[test]
    fn advance_saturates_at_the_last_date() {
        assert_eq!(Cadence::Days(1).advance(NaiveDate::MAX), NaiveDate::MAX);
        assert_eq!(Cadence::Years(u32::MAX).advance(date(2024, 1, 1)), date(2024, 1, 1));

        let rule = Recurrence::parse("every week").unwrap();
        let dates = TaskDates {
            due: Some(NaiveDate::MAX),
            ..Default::default()
        };
        let next = rule.next_dates(&dates, date(2024, 2, 11));
        assert_eq!(next.due, Some(NaiveDate::MAX));
    }
}

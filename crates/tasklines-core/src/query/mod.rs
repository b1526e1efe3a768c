//! Filter and sort fields for task queries.
//!
//! Each [`Field`] owns a registry of named filter instructions and may
//! offer a comparator. A [`Query`] is a list of instruction lines such as
//! `not done` or `sort by status reverse`, resolved against the known fields.

mod recurring_field;
mod status_field;

pub use recurring_field::RecurringField;
pub use status_field::StatusField;

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

use crate::error::QueryError;
use crate::task::Task;

/// Predicate over a single task.
pub type Predicate = fn(&Task) -> bool;

/// Three-way comparison of two tasks.
pub type Comparator = fn(&Task, &Task) -> Ordering;

static SORT_BY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^sort by ([a-z ]+?)( reverse)?$").expect("valid sort instruction regex")
});

/// Lower-case and collapse runs of whitespace.
fn normalise(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Named boolean predicates understood by one field.
#[derive(Default)]
pub struct FilterInstructions {
    instructions: Vec<(String, Predicate)>,
}

impl FilterInstructions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, instruction: &str, predicate: Predicate) {
        self.instructions.push((normalise(instruction), predicate));
    }

    pub fn can_create_filter(&self, line: &str) -> bool {
        let line = normalise(line);
        self.instructions.iter().any(|(name, _)| *name == line)
    }

    pub fn create_filter(&self, line: &str) -> Option<Filter> {
        let line = normalise(line);
        self.instructions
            .iter()
            .find(|(name, _)| *name == line)
            .map(|(name, predicate)| Filter {
                instruction: name.clone(),
                predicate: *predicate,
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().map(|(name, _)| name.as_str())
    }
}

/// A resolved filter instruction.
#[derive(Clone)]
pub struct Filter {
    pub instruction: String,
    predicate: Predicate,
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        (self.predicate)(task)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("instruction", &self.instruction)
            .finish()
    }
}

/// A resolved sort instruction.
#[derive(Clone)]
pub struct Sorter {
    pub field_name: &'static str,
    pub reverse: bool,
    comparator: Comparator,
}

impl Sorter {
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = (self.comparator)(a, b);
        if self.reverse {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl fmt::Debug for Sorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sorter")
            .field("field_name", &self.field_name)
            .field("reverse", &self.reverse)
            .finish()
    }
}

/// A task property that queries can filter and possibly sort on.
pub trait Field {
    /// Name used in `sort by <name>`.
    fn field_name(&self) -> &'static str;

    fn filter_instructions(&self) -> &FilterInstructions;

    fn can_create_filter(&self, line: &str) -> bool {
        self.filter_instructions().can_create_filter(line)
    }

    fn create_filter(&self, line: &str) -> Option<Filter> {
        self.filter_instructions().create_filter(line)
    }

    fn supports_sorting(&self) -> bool {
        false
    }

    fn comparator(&self) -> Option<Comparator> {
        None
    }

    fn create_sorter(&self, reverse: bool) -> Option<Sorter> {
        if !self.supports_sorting() {
            return None;
        }
        Some(Sorter {
            field_name: self.field_name(),
            reverse,
            comparator: self.comparator()?,
        })
    }
}

/// Every field known to queries.
pub fn all_fields() -> Vec<Box<dyn Field>> {
    vec![Box::new(StatusField::new()), Box::new(RecurringField::new())]
}

/// Sort with each sorter in turn breaking ties of the previous ones.
/// The sort is stable, so fully tied tasks keep document order.
pub fn sort_tasks(tasks: &mut [Task], sorters: &[Sorter]) {
    tasks.sort_by(|a, b| {
        sorters
            .iter()
            .map(|sorter| sorter.compare(a, b))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

/// Parsed query: filters are AND-ed, sorters applied in order.
#[derive(Debug, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub sorters: Vec<Sorter>,
}

impl Query {
    /// Resolve each non-empty line against the known fields.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Query, QueryError> {
        let fields = all_fields();
        let mut query = Query::default();

        for raw in lines {
            let line = normalise(raw.as_ref());
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = SORT_BY_RE.captures(&line) {
                let name = caps.get(1).map_or("", |m| m.as_str()).trim();
                let reverse = caps.get(2).is_some();
                let field = fields
                    .iter()
                    .find(|f| f.field_name() == name)
                    .ok_or_else(|| QueryError::UnknownInstruction(raw.as_ref().to_string()))?;
                let sorter = field
                    .create_sorter(reverse)
                    .ok_or_else(|| QueryError::SortingNotSupported(name.to_string()))?;
                query.sorters.push(sorter);
                continue;
            }

            let filter = fields
                .iter()
                .find_map(|f| f.create_filter(&line))
                .ok_or_else(|| QueryError::UnknownInstruction(raw.as_ref().to_string()))?;
            query.filters.push(filter);
        }

        Ok(query)
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }

    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        let mut selected: Vec<Task> = tasks.into_iter().filter(|t| self.matches(t)).collect();
        sort_tasks(&mut selected, &self.sorters);
        selected
    }
}

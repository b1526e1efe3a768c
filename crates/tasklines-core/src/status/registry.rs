//! Lookup table from checkbox indicator to [`Status`].

use tracing::debug;

use super::{Status, StatusType};

/// Known statuses, in registration order.
#[derive(Debug, Clone)]
pub struct StatusRegistry {
    statuses: Vec<Status>,
}

impl StatusRegistry {
    /// A registry with no statuses at all.
    pub fn empty() -> Self {
        Self {
            statuses: Vec::new(),
        }
    }

    /// The built-in statuses: todo, done, in progress, cancelled.
    pub fn core() -> Self {
        let mut registry = Self::empty();
        registry.register(Status::make_todo());
        registry.register(Status::make_done());
        registry.register(Status::make_in_progress());
        registry.register(Status::make_cancelled());
        registry
    }

    /// Add a status, replacing any existing one with the same indicator.
    pub fn register(&mut self, status: Status) {
        if let Some(existing) = self
            .statuses
            .iter_mut()
            .find(|s| s.indicator == status.indicator)
        {
            debug!(indicator = %status.indicator, name = %status.name, "replacing status");
            *existing = status;
        } else {
            self.statuses.push(status);
        }
    }

    pub fn get(&self, indicator: char) -> Option<&Status> {
        self.statuses.iter().find(|s| s.indicator == indicator)
    }

    /// Status for an indicator; unregistered indicators yield an open
    /// "Unknown" status so the line still round-trips.
    pub fn by_indicator(&self, indicator: char) -> Status {
        self.get(indicator)
            .cloned()
            .unwrap_or_else(|| Status::make_unknown(indicator))
    }

    /// The status a toggle moves `status` to.
    pub fn next_status(&self, status: &Status) -> Status {
        self.by_indicator(status.next_indicator)
    }

    /// First registered status of the given type.
    pub fn first_of_type(&self, status_type: StatusType) -> Option<&Status> {
        self.statuses.iter().find(|s| s.status_type == status_type)
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self::core()
    }
}

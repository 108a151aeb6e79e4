//! Filter criteria as selected in the planner's list controls.

use crate::error::ParseError;
use crate::task::{Category, Priority, Task};
use std::str::FromStr;

/// Value shown by every filter control to mean "no filtering".
pub const ALL: &str = "All";

/// Either every value passes, or only one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

/// Completion status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn matches(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => completed,
            StatusFilter::Pending => !completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ALL => Ok(StatusFilter::All),
            "Completed" => Ok(StatusFilter::Completed),
            "Pending" => Ok(StatusFilter::Pending),
            other => Err(ParseError::UnknownStatus(other.to_string())),
        }
    }
}

/// The three task list filters combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub category: Filter<Category>,
    pub priority: Filter<Priority>,
    pub status: StatusFilter,
}

impl TaskFilter {
    /// Builds a filter from the raw values of the category, priority and
    /// status controls.
    pub fn from_controls(category: &str, priority: &str, status: &str) -> Result<Self, ParseError> {
        Ok(Self {
            category: category.parse()?,
            priority: priority.parse()?,
            status: status.parse()?,
        })
    }

    /// Resets every criterion to "All".
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.category.matches(&task.category)
            && self.priority.matches(&task.priority)
            && self.status.matches(task.completed)
    }
}

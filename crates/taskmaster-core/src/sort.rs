use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;

use crate::Task;

/// Orderings offered for the task list.
///
/// Every ordering is applied with a stable sort, so tasks that compare equal
/// keep their insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Highest priority first.
    Priority,
    /// Earliest due date first; tasks without a usable date last.
    DueDate,
    /// Alphabetical, ignoring case.
    Title,
    /// Incomplete tasks before completed ones.
    Completion,
}

impl SortOption {
    /// Every sort option in menu order.
    pub const ALL: [Self; 4] = [Self::Priority, Self::DueDate, Self::Title, Self::Completion];

    /// Token accepted on the command line and in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::DueDate => "due_date",
            Self::Title => "title",
            Self::Completion => "completion",
        }
    }

    /// Compare two tasks under this ordering.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Priority => b.priority.rank().cmp(&a.priority.rank()),
            Self::DueDate => a.due_date.sort_key().cmp(&b.due_date.sort_key()),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::Completion => a.is_completed.cmp(&b.is_completed),
        }
    }

    /// Stable in-place sort.
    pub fn sort(self, tasks: &mut [Task]) {
        match self {
            // Lowercasing allocates, so compute each key once.
            Self::Title => tasks.sort_by_cached_key(|task| task.title.to_lowercase()),
            _ => tasks.sort_by(|a, b| self.compare(a, b)),
        }
    }

    /// Sorted copy of `tasks`; the input order is left as is.
    #[must_use]
    pub fn sorted(self, tasks: &[Task]) -> Vec<Task> {
        let mut sorted = tasks.to_vec();
        self.sort(&mut sorted);
        sorted
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token does not name a sort option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort option: {token} (expected priority, due_date, title or completion)")]
pub struct ParseSortOptionError {
    /// Token as supplied by the caller.
    pub token: String,
}

impl FromStr for SortOption {
    type Err = ParseSortOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "priority" => Ok(Self::Priority),
            "due_date" | "duedate" | "due" => Ok(Self::DueDate),
            "title" | "name" => Ok(Self::Title),
            "completion" | "completed" | "status" => Ok(Self::Completion),
            _ => Err(ParseSortOptionError {
                token: s.to_owned(),
            }),
        }
    }
}

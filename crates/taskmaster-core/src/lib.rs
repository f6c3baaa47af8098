//! Domain types for taskmaster: the task record and the pure views computed over it.

/// Due date parsing.
pub mod due_date;
/// Completion/priority filters.
pub mod filter;
/// Identifier types.
pub mod id;
/// Priority ranking.
pub mod priority;
/// Sort orders.
pub mod sort;
/// Aggregate counters.
pub mod stats;

pub use crate::due_date::DueDate;
pub use crate::filter::TaskFilter;
pub use crate::id::TaskId;
pub use crate::priority::Priority;
pub use crate::sort::SortOption;
pub use crate::stats::TaskStatistics;

use serde::{Deserialize, Serialize};

/// Editable fields of a task.
///
/// Used both to create a task and to replace an existing one; the id and the
/// completion flag are never part of an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    /// Human-readable title.
    pub title: String,
    /// Free-form notes, possibly empty.
    pub description: String,
    /// Ranking bucket.
    pub priority: Priority,
    /// Optional due date (`YYYY-MM-DD`, empty for none).
    pub due_date: DueDate,
}

impl TaskFields {
    /// Bundle the editable fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        due_date: impl Into<DueDate>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
            due_date: due_date.into(),
        }
    }
}

/// A single task as held by the store.
///
/// Values are never changed in place: edits and completion toggles build a
/// new `Task` carrying the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier issued by the store.
    pub id: TaskId,
    /// Human-readable title.
    pub title: String,
    /// Free-form notes.
    pub description: String,
    /// Ranking bucket.
    pub priority: Priority,
    /// Whether the task has been completed.
    pub is_completed: bool,
    /// Raw due date text.
    pub due_date: DueDate,
}

impl Task {
    /// Build a new, incomplete task.
    #[must_use]
    pub fn new(id: TaskId, fields: TaskFields) -> Self {
        let TaskFields {
            title,
            description,
            priority,
            due_date,
        } = fields;
        Self {
            id,
            title,
            description,
            priority,
            is_completed: false,
            due_date,
        }
    }

    /// Copy of this task with its editable fields replaced.
    #[must_use]
    pub fn with_fields(&self, fields: TaskFields) -> Self {
        Self {
            is_completed: self.is_completed,
            ..Self::new(self.id, fields)
        }
    }

    /// Copy of this task with the completion flag flipped.
    #[must_use]
    pub fn with_completion_toggled(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    /// Editable fields of this task.
    #[must_use]
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            due_date: self.due_date.clone(),
        }
    }

    /// Incomplete and due strictly before `today`.
    #[must_use]
    pub fn is_overdue(&self, today: time::Date) -> bool {
        !self.is_completed && self.due_date.is_before(today)
    }
}

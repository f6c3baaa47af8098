use serde::{Deserialize, Serialize};

use crate::{Priority, Task};

/// Criteria used to narrow the task list.
///
/// A task matches when completed tasks are shown or it is incomplete, and no
/// priority is selected or its priority equals the selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Include completed tasks.
    pub show_completed: bool,
    /// Restrict to a single priority.
    pub priority: Option<Priority>,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl TaskFilter {
    /// Filter that lets every task through.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            show_completed: true,
            priority: None,
        }
    }

    /// Filter with both criteria set explicitly.
    #[must_use]
    pub const fn new(show_completed: bool, priority: Option<Priority>) -> Self {
        Self {
            show_completed,
            priority,
        }
    }

    /// Returns true when the filter lets every task through.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.show_completed && self.priority.is_none()
    }

    /// Determine whether the task passes both criteria.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let completion_match = self.show_completed || !task.is_completed;
        let priority_match = self.priority.is_none_or(|wanted| task.priority == wanted);
        completion_match && priority_match
    }

    /// Keep matching tasks, preserving their order.
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }
}

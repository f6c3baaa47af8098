use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Priority, Task};

/// Counters computed over the whole task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    /// Number of tasks.
    pub total_tasks: usize,
    /// Number of completed tasks.
    pub completed_tasks: usize,
    /// Incomplete tasks with [`Priority::High`].
    pub pending_high_priority: usize,
    /// Completed share as a whole percentage, rounded half up; `0` for no tasks.
    pub completion_rate: u8,
    /// Incomplete tasks whose due date is strictly before today.
    pub overdue_tasks: usize,
}

impl TaskStatistics {
    /// Compute statistics for `tasks`, judging due dates against `today`.
    #[must_use]
    pub fn from_tasks(tasks: &[Task], today: Date) -> Self {
        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|task| task.is_completed).count();
        let pending_high_priority = tasks
            .iter()
            .filter(|task| task.priority == Priority::High && !task.is_completed)
            .count();
        let overdue_tasks = tasks.iter().filter(|task| task.is_overdue(today)).count();

        Self {
            total_tasks,
            completed_tasks,
            pending_high_priority,
            completion_rate: completion_rate(completed_tasks, total_tasks),
            overdue_tasks,
        }
    }

    /// Number of tasks not yet completed.
    #[must_use]
    pub const fn pending_tasks(&self) -> usize {
        self.total_tasks - self.completed_tasks
    }
}

/// `round(completed / total * 100)` with halves rounded up, in integer arithmetic.
#[must_use]
pub fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    let rate = (completed * 200 + total) / (total * 2);
    u8::try_from(rate).unwrap_or(100)
}

//! Bootstrap fixture loaded into a fresh store for demos.

use taskmaster_core::Priority;

use crate::clock::Clock;
use crate::task_store::TaskStore;

/// Example task definition: title, description, priority, due date.
pub type ExampleTask = (&'static str, &'static str, Priority, &'static str);

/// Tasks added by [`seed_examples`], in insertion order.
pub const EXAMPLE_TASKS: [ExampleTask; 3] = [
    (
        "Complete project documentation",
        "Write comprehensive docs",
        Priority::High,
        "2024-12-30",
    ),
    (
        "Review pull requests",
        "Check and approve pending PRs",
        Priority::Medium,
        "2024-12-25",
    ),
    (
        "Fix navigation bug",
        "Users report navigation issues",
        Priority::High,
        "2024-12-20",
    ),
];

/// Append the example tasks to `store`.
pub fn seed_examples<C: Clock>(store: &mut TaskStore<C>) {
    for (title, description, priority, due_date) in EXAMPLE_TASKS {
        store.add_task(title, description, priority, due_date);
    }
    tracing::debug!(count = EXAMPLE_TASKS.len(), "seeded example tasks");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use taskmaster_core::TaskId;
    use time::macros::date;

    #[test]
    fn fixture_has_fixed_titles_priorities_and_dates() {
        let mut store = TaskStore::with_clock(FixedClock(date!(2024 - 12 - 01)));
        seed_examples(&mut store);

        let tasks = store.tasks();
        assert_eq!(tasks.len(), 3);
        let ids: Vec<TaskId> = tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![TaskId(1), TaskId(2), TaskId(3)]);
        let priorities: Vec<Priority> = tasks.iter().map(|task| task.priority).collect();
        assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::High]);
        assert_eq!(tasks[0].title, "Complete project documentation");
        assert_eq!(tasks[2].due_date.as_str(), "2024-12-20");
        assert!(tasks.iter().all(|task| !task.is_completed));
    }

    #[test]
    fn fixture_dates_become_overdue_after_christmas() {
        let mut store = TaskStore::with_clock(FixedClock(date!(2024 - 12 - 26)));
        seed_examples(&mut store);

        let stats = store.get_task_statistics();
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.pending_high_priority, 2);
        assert_eq!(stats.overdue_tasks, 2);
        assert_eq!(stats.completion_rate, 0);
    }

    #[test]
    fn with_examples_seeds_a_system_clock_store() {
        let store = TaskStore::with_examples();
        assert_eq!(store.len(), 3);
        assert_eq!(store.revision(), 3);
    }
}

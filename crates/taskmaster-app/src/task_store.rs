//! In-memory task collection and the operations the presentation layer drives.

use taskmaster_core::{
    DueDate, Priority, SortOption, Task, TaskFields, TaskFilter, TaskId, TaskStatistics,
};
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::observer::{ObserverList, SubscriptionId, TaskObserver, TaskSnapshot};
use crate::seed;

/// Sole owner of the task collection.
///
/// Tasks keep insertion order. Ids come from a counter that starts at 1 and
/// only moves forward, so an id is never handed out twice even after the task
/// carrying it is deleted. Operations on unknown ids are no-ops.
#[derive(Debug)]
pub struct TaskStore<C = SystemClock> {
    tasks: Vec<Task>,
    next_id: TaskId,
    revision: u64,
    clock: C,
    observers: ObserverList,
}

impl TaskStore<SystemClock> {
    /// Empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Store seeded with the three example tasks.
    #[must_use]
    pub fn with_examples() -> Self {
        let mut store = Self::new();
        seed::seed_examples(&mut store);
        store
    }
}

impl Default for TaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TaskStore<C> {
    /// Empty store reading "today" from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: TaskId::FIRST,
            revision: 0,
            clock,
            observers: ObserverList::default(),
        }
    }

    /// Clock used for overdue checks.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Live collection in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks held.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when the store holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Counter bumped on every effective mutation.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Immutable copy of the current collection.
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot::new(self.revision, &self.tasks)
    }

    /// Register an observer that receives a snapshot after each change.
    pub fn subscribe(&mut self, observer: impl TaskObserver + 'static) -> SubscriptionId {
        let id = self.observers.add(Box::new(observer));
        debug!(subscription = %id, observers = self.observers.len(), "observer registered");
        id
    }

    /// Remove a previously registered observer. Returns false for unknown handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    /// Append a new, incomplete task and return it.
    ///
    /// Contents are not validated here; callers check drafts before submitting them.
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        due_date: impl Into<DueDate>,
    ) -> Task {
        self.add(TaskFields::new(title, description, priority, due_date))
    }

    /// [`add_task`](Self::add_task) taking the fields as one value.
    pub fn add(&mut self, fields: TaskFields) -> Task {
        let id = self.next_id;
        self.next_id = id.next();
        let task = Task::new(id, fields);
        self.tasks.push(task.clone());
        debug!(task = %id, priority = %task.priority, "task added");
        self.commit();
        task
    }

    /// Replace the editable fields of task `id`, keeping its id and completion flag.
    ///
    /// Returns the new value, or `None` when no such task exists.
    pub fn update_task(
        &mut self,
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        due_date: impl Into<DueDate>,
    ) -> Option<Task> {
        self.update(id, TaskFields::new(title, description, priority, due_date))
    }

    /// [`update_task`](Self::update_task) taking the fields as one value.
    pub fn update(&mut self, id: TaskId, fields: TaskFields) -> Option<Task> {
        let updated = self.replace_with(id, |task| task.with_fields(fields))?;
        debug!(task = %id, "task updated");
        self.commit();
        Some(updated)
    }

    /// Flip the completion flag of task `id`.
    ///
    /// Returns the new value, or `None` when no such task exists.
    pub fn toggle_task_completion(&mut self, id: TaskId) -> Option<Task> {
        let toggled = self.replace_with(id, Task::with_completion_toggled)?;
        debug!(task = %id, completed = toggled.is_completed, "task completion toggled");
        self.commit();
        Some(toggled)
    }

    /// Remove task `id`. Returns the removed value, or `None` when absent.
    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        let Some(index) = self.position(id) else {
            trace!(task = %id, "delete skipped: unknown task");
            return None;
        };
        let removed = self.tasks.remove(index);
        // Ids are unique, but drop any stragglers so "every match" holds regardless.
        self.tasks.retain(|task| task.id != id);
        debug!(task = %id, remaining = self.tasks.len(), "task deleted");
        self.commit();
        Some(removed)
    }

    /// Look up a task by id.
    pub fn get_task_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks passing both criteria, in collection order.
    pub fn get_filtered_tasks(&self, show_completed: bool, filter_priority: Option<Priority>) -> Vec<Task> {
        TaskFilter::new(show_completed, filter_priority).apply(&self.tasks)
    }

    /// Whole collection under `sort_by`; stored order is not touched.
    pub fn get_sorted_tasks(&self, sort_by: SortOption) -> Vec<Task> {
        sort_by.sorted(&self.tasks)
    }

    /// Filtered tasks, optionally re-ordered.
    pub fn get_view(&self, filter: &TaskFilter, sort_by: Option<SortOption>) -> Vec<Task> {
        let mut view = filter.apply(&self.tasks);
        if let Some(option) = sort_by {
            option.sort(&mut view);
        }
        view
    }

    /// Counters over the whole collection, with "today" taken from the clock.
    pub fn get_task_statistics(&self) -> TaskStatistics {
        TaskStatistics::from_tasks(&self.tasks, self.clock.today())
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn replace_with(&mut self, id: TaskId, edit: impl FnOnce(&Task) -> Task) -> Option<Task> {
        let Some(index) = self.position(id) else {
            trace!(task = %id, "change skipped: unknown task");
            return None;
        };
        let replacement = edit(&self.tasks[index]);
        self.tasks[index] = replacement.clone();
        Some(replacement)
    }

    fn commit(&mut self) {
        self.revision += 1;
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.observers.notify(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::cell::RefCell;
    use std::rc::Rc;
    use time::{Date, Duration, macros::date};

    const TODAY: Date = date!(2025 - 03 - 15);

    fn store() -> TaskStore<FixedClock> {
        TaskStore::with_clock(FixedClock(TODAY))
    }

    fn add(store: &mut TaskStore<FixedClock>, title: &str, priority: Priority, due: &str) -> TaskId {
        store.add_task(title, "", priority, due).id
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.title.as_str()).collect()
    }

    #[test]
    fn add_assigns_increasing_ids_starting_at_one() {
        let mut store = store();
        let first = store.add_task("one", "desc", Priority::High, "2025-01-01");
        let second = store.add_task("two", "", Priority::Low, "");
        assert_eq!(first.id, TaskId(1));
        assert_eq!(second.id, TaskId(2));
        assert!(!first.is_completed);
        assert_eq!(first.description, "desc");
        assert_eq!(titles(store.tasks()), vec!["one", "two"]);
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let mut store = store();
        let mut issued = Vec::new();
        for round in 0..20 {
            let id = add(&mut store, &format!("task {round}"), Priority::Medium, "");
            issued.push(id);
            if round % 3 == 0 {
                store.delete_task(id);
            }
        }
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
        let after = add(&mut store, "late", Priority::Low, "");
        assert_eq!(after, TaskId(21));
    }

    #[test]
    fn add_does_not_validate_contents() {
        let mut store = store();
        let task = store.add_task("", "", Priority::Low, "whenever");
        assert_eq!(store.get_task_by_id(task.id), Some(&task));
    }

    #[test]
    fn update_replaces_fields_and_keeps_completion() {
        let mut store = store();
        let id = add(&mut store, "draft", Priority::Low, "");
        store.toggle_task_completion(id);

        let updated = store
            .update_task(id, "final", "notes", Priority::High, "2025-04-01")
            .unwrap_or_else(|| panic!("task {id} should exist"));
        assert_eq!(updated.id, id);
        assert!(updated.is_completed);
        assert_eq!(updated.title, "final");
        assert_eq!(updated.description, "notes");
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(store.get_task_by_id(id), Some(&updated));
    }

    #[test]
    fn missing_ids_leave_collection_unchanged() {
        let mut store = store();
        add(&mut store, "keep", Priority::High, "");
        let before = store.tasks().to_vec();
        let revision = store.revision();

        assert!(store.update_task(TaskId(99), "x", "", Priority::Low, "").is_none());
        assert!(store.toggle_task_completion(TaskId(99)).is_none());
        assert!(store.delete_task(TaskId(99)).is_none());
        assert!(store.get_task_by_id(TaskId(99)).is_none());

        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn toggle_twice_restores_completion() {
        let mut store = store();
        let id = add(&mut store, "flip", Priority::Medium, "");
        let original = store.get_task_by_id(id).cloned();
        assert_eq!(store.toggle_task_completion(id).map(|task| task.is_completed), Some(true));
        assert_eq!(store.toggle_task_completion(id).map(|task| task.is_completed), Some(false));
        assert_eq!(store.get_task_by_id(id).cloned(), original);
    }

    #[test]
    fn delete_removes_task_and_keeps_order() {
        let mut store = store();
        add(&mut store, "a", Priority::Low, "");
        let b = add(&mut store, "b", Priority::Low, "");
        add(&mut store, "c", Priority::Low, "");

        let removed = store.delete_task(b).unwrap_or_else(|| panic!("b should exist"));
        assert_eq!(removed.title, "b");
        assert_eq!(titles(store.tasks()), vec!["a", "c"]);
        assert!(store.get_task_by_id(b).is_none());
    }

    #[test]
    fn unfiltered_view_is_full_collection_in_order() {
        let mut store = store();
        for title in ["x", "y", "z"] {
            add(&mut store, title, Priority::Medium, "");
        }
        store.toggle_task_completion(TaskId(2));
        assert_eq!(store.get_filtered_tasks(true, None), store.tasks());
        assert_eq!(titles(&store.get_filtered_tasks(false, None)), vec!["x", "z"]);
    }

    #[test]
    fn filter_by_priority() {
        let mut store = store();
        add(&mut store, "hi", Priority::High, "");
        add(&mut store, "lo", Priority::Low, "");
        let done = add(&mut store, "hi-done", Priority::High, "");
        store.toggle_task_completion(done);

        assert_eq!(
            titles(&store.get_filtered_tasks(true, Some(Priority::High))),
            vec!["hi", "hi-done"]
        );
        assert_eq!(titles(&store.get_filtered_tasks(false, Some(Priority::High))), vec!["hi"]);
    }

    #[test]
    fn priority_sort_keeps_ties_in_insertion_order() {
        let mut store = store();
        add(&mut store, "low", Priority::Low, "");
        add(&mut store, "high-1", Priority::High, "");
        add(&mut store, "medium", Priority::Medium, "");
        add(&mut store, "high-2", Priority::High, "");

        let sorted = store.get_sorted_tasks(SortOption::Priority);
        assert_eq!(titles(&sorted), vec!["high-1", "high-2", "medium", "low"]);
        assert_eq!(titles(store.tasks()), vec!["low", "high-1", "medium", "high-2"]);
    }

    #[test]
    fn due_date_sort_puts_undated_tasks_last() {
        let mut store = store();
        add(&mut store, "undated", Priority::Low, "");
        add(&mut store, "later", Priority::Low, "2025-05-01");
        add(&mut store, "sooner", Priority::Low, "2025-04-01");

        let sorted = store.get_sorted_tasks(SortOption::DueDate);
        assert_eq!(titles(&sorted), vec!["sooner", "later", "undated"]);
    }

    #[test]
    fn view_filters_then_sorts() {
        let mut store = store();
        add(&mut store, "beta", Priority::High, "");
        let done = add(&mut store, "alpha", Priority::High, "");
        add(&mut store, "Gamma", Priority::Low, "");
        add(&mut store, "delta", Priority::High, "");
        store.toggle_task_completion(done);

        let view = store.get_view(&TaskFilter::new(false, Some(Priority::High)), Some(SortOption::Title));
        assert_eq!(titles(&view), vec!["beta", "delta"]);
        let unsorted = store.get_view(&TaskFilter::all(), None);
        assert_eq!(unsorted, store.tasks());
    }

    #[test]
    fn statistics_on_empty_store_are_zero() {
        let stats = store().get_task_statistics();
        assert_eq!(stats, TaskStatistics::default());
    }

    #[test]
    fn completion_rate_of_one_in_three_is_33() {
        let mut store = store();
        let first = add(&mut store, "a", Priority::Low, "");
        add(&mut store, "b", Priority::Low, "");
        add(&mut store, "c", Priority::Low, "");
        store.toggle_task_completion(first);

        let stats = store.get_task_statistics();
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn task_due_yesterday_is_overdue_until_completed() {
        let mut store = store();
        let yesterday = DueDate::from_date(TODAY - Duration::days(1));
        let id = store.add_task("late", "", Priority::High, yesterday).id;
        add(&mut store, "today", Priority::High, "2025-03-15");

        let stats = store.get_task_statistics();
        assert_eq!(stats.overdue_tasks, 1);
        assert_eq!(stats.pending_high_priority, 2);

        store.toggle_task_completion(id);
        let stats = store.get_task_statistics();
        assert_eq!(stats.overdue_tasks, 0);
        assert_eq!(stats.pending_high_priority, 1);
    }

    #[test]
    fn observers_receive_snapshot_after_each_effective_change() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = store.subscribe(move |snapshot: &TaskSnapshot| {
            sink.borrow_mut().push((snapshot.revision(), snapshot.len()));
        });

        let id = add(&mut store, "watched", Priority::Low, "");
        store.toggle_task_completion(id);
        store.toggle_task_completion(TaskId(42));
        store.update_task(id, "renamed", "", Priority::Low, "");
        store.delete_task(id);

        assert_eq!(*seen.borrow(), vec![(1, 1), (2, 1), (3, 1), (4, 0)]);

        assert!(store.unsubscribe(subscription));
        add(&mut store, "unwatched", Priority::Low, "");
        assert_eq!(seen.borrow().len(), 4);
    }

    #[test]
    fn snapshot_does_not_follow_later_changes() {
        let mut store = store();
        add(&mut store, "first", Priority::Low, "");
        let snapshot = store.snapshot();
        add(&mut store, "second", Priority::Low, "");

        assert_eq!(snapshot.revision(), 1);
        assert_eq!(titles(snapshot.tasks()), vec!["first"]);
        assert_eq!(store.len(), 2);
    }
}

//! Snapshot notifications pushed from the store to its readers.

use std::fmt;
use std::sync::Arc;

use taskmaster_core::Task;

/// Immutable copy of the task collection at a given revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSnapshot {
    revision: u64,
    tasks: Arc<[Task]>,
}

impl TaskSnapshot {
    pub(crate) fn new(revision: u64, tasks: &[Task]) -> Self {
        Self {
            revision,
            tasks: Arc::from(tasks),
        }
    }

    /// Revision counter of the store when the snapshot was taken.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Tasks in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when the snapshot holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Receives a snapshot after every change to the store.
pub trait TaskObserver {
    /// Called once per effective mutation, in registration order.
    fn on_change(&mut self, snapshot: &TaskSnapshot);
}

impl<F> TaskObserver for F
where
    F: FnMut(&TaskSnapshot),
{
    fn on_change(&mut self, snapshot: &TaskSnapshot) {
        self(snapshot);
    }
}

/// Handle returned by [`crate::TaskStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Registered observers, kept in registration order.
#[derive(Default)]
pub(crate) struct ObserverList {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn TaskObserver>)>,
}

impl ObserverList {
    pub(crate) fn add(&mut self, observer: Box<dyn TaskObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn notify(&mut self, snapshot: &TaskSnapshot) {
        for (_, observer) in &mut self.entries {
            observer.on_change(snapshot);
        }
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("next_id", &self.next_id)
            .field(
                "subscriptions",
                &self.entries.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use taskmaster_core::{Priority, TaskFields, TaskId};

    #[test]
    fn observers_run_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut list = ObserverList::default();
        for name in ["first", "second"] {
            let calls = Rc::clone(&calls);
            list.add(Box::new(move |snapshot: &TaskSnapshot| {
                calls.borrow_mut().push((name, snapshot.revision()));
            }));
        }

        list.notify(&TaskSnapshot::new(3, &[]));
        assert_eq!(*calls.borrow(), vec![("first", 3), ("second", 3)]);
    }

    #[test]
    fn removed_observers_stop_receiving() {
        let count = Rc::new(RefCell::new(0));
        let mut list = ObserverList::default();
        let counter = Rc::clone(&count);
        let id = list.add(Box::new(move |_: &TaskSnapshot| *counter.borrow_mut() += 1));

        list.notify(&TaskSnapshot::default());
        assert!(list.remove(id));
        assert!(!list.remove(id));
        list.notify(&TaskSnapshot::default());
        assert_eq!(*count.borrow(), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn snapshot_is_detached_from_source() {
        let mut tasks = vec![Task::new(
            TaskId(1),
            TaskFields::new("one", "", Priority::Low, ""),
        )];
        let snapshot = TaskSnapshot::new(1, &tasks);
        tasks.clear();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.tasks()[0].title, "one");
    }
}

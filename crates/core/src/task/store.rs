//! In-memory task store
//!
//! The store owns the ordered task collection. Every mutation publishes a
//! fresh [`TaskList`] snapshot, so lists handed out earlier never change.

use std::fmt;
use std::iter;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::debug;

use super::model::{Task, TaskId, TaskStatus};

/// Immutable snapshot of the task collection, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList(Arc<[Task]>);

impl TaskList {
    /// Whether both lists are the same published snapshot
    pub fn ptr_eq(&self, other: &TaskList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Get a task by ID
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.0.iter().find(|task| task.id() == id)
    }

    /// Tasks with the given status, in store order
    pub fn with_status(&self, status: TaskStatus) -> impl Iterator<Item = &Task> {
        self.0.iter().filter(move |task| task.status() == status)
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self(Arc::from(tasks))
    }
}

impl Deref for TaskList {
    type Target = [Task];

    fn deref(&self) -> &[Task] {
        &self.0
    }
}

impl Serialize for TaskList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// Handle returned by [`TaskStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TaskList)>;

/// Single owner of the task collection
///
/// Observers either poll [`TaskStore::revision`] or register a listener that
/// runs synchronously after each published change.
pub struct TaskStore {
    tasks: TaskList,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tasks: TaskList::default(),
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current snapshot of all tasks
    pub fn tasks(&self) -> TaskList {
        self.tasks.clone()
    }

    /// Get a task by ID
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of snapshots published so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append a new task
    ///
    /// The store does not validate its input; title checks belong to the form.
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
    ) -> Task {
        let mut id = TaskId::new();
        while self.tasks.get(id).is_some() {
            id = TaskId::new();
        }

        let task = Task::new(id, title.into(), description.into(), status);
        debug!(task_id = %task.id(), status = ?status, "Adding task");

        let tasks = self
            .tasks
            .iter()
            .cloned()
            .chain(iter::once(task.clone()))
            .collect();
        self.publish(tasks);
        task
    }

    /// Replace the status of a task
    ///
    /// Returns `false` without publishing when no task has the given ID.
    pub fn update_task_status(&mut self, id: TaskId, status: TaskStatus) -> bool {
        if self.tasks.get(id).is_none() {
            debug!(task_id = %id, "Ignoring status update for unknown task");
            return false;
        }

        debug!(task_id = %id, status = ?status, "Updating task status");
        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id() == id {
                    task.with_status(status)
                } else {
                    task.clone()
                }
            })
            .collect();
        self.publish(tasks);
        true
    }

    /// Remove a task, returning it if it was present
    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        let Some(removed) = self.tasks.get(id).cloned() else {
            debug!(task_id = %id, "Ignoring delete for unknown task");
            return None;
        };

        debug!(task_id = %id, "Deleting task");
        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.id() != id)
            .cloned()
            .collect();
        self.publish(tasks);
        Some(removed)
    }

    /// Register a listener for newly published snapshots
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&TaskList) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns `false` if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn publish(&mut self, tasks: Vec<Task>) {
        self.tasks = TaskList::from(tasks);
        self.revision += 1;

        let snapshot = self.tasks.clone();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn titles(tasks: &TaskList) -> Vec<&str> {
        tasks.iter().map(|task| task.title()).collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TaskStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_add_task_appends_in_call_order() {
        let mut store = TaskStore::new();
        store.add_task("Task 1", "", TaskStatus::NotStarted);
        store.add_task("Task 2", "second", TaskStatus::Done);
        store.add_task("Task 3", "", TaskStatus::InProgress);

        let tasks = store.tasks();
        assert_eq!(titles(&tasks), vec!["Task 1", "Task 2", "Task 3"]);

        let ids: HashSet<TaskId> = tasks.iter().map(|task| task.id()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn test_add_task_keeps_fields_as_given() {
        let mut store = TaskStore::new();
        let task = store.add_task("  padded  ", "draft v1", TaskStatus::Done);

        let stored = store.get(task.id()).unwrap();
        assert_eq!(stored, &task);
        assert_eq!(stored.title(), "  padded  ");
        assert_eq!(stored.description(), "draft v1");
        assert_eq!(stored.status(), TaskStatus::Done);
    }

    #[test]
    fn test_store_accepts_empty_title() {
        let mut store = TaskStore::new();
        store.add_task("", "", TaskStatus::NotStarted);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_task_status_changes_only_status() {
        let mut store = TaskStore::new();
        let first = store.add_task("First", "a", TaskStatus::NotStarted);
        let second = store.add_task("Second", "b", TaskStatus::NotStarted);
        let third = store.add_task("Third", "c", TaskStatus::Done);

        assert!(store.update_task_status(second.id(), TaskStatus::InProgress));

        let tasks = store.tasks();
        assert_eq!(titles(&tasks), vec!["First", "Second", "Third"]);
        assert_eq!(tasks[0], first);
        assert_eq!(tasks[2], third);

        let updated = &tasks[1];
        assert_eq!(updated.id(), second.id());
        assert_eq!(updated.title(), "Second");
        assert_eq!(updated.description(), "b");
        assert_eq!(updated.status(), TaskStatus::InProgress);
    }

    #[test]
    fn test_update_unknown_task_is_noop() {
        let mut store = TaskStore::new();
        store.add_task("Only", "", TaskStatus::NotStarted);
        let before = store.tasks();
        let revision = store.revision();

        assert!(!store.update_task_status(TaskId::new(), TaskStatus::Done));

        assert!(store.tasks().ptr_eq(&before));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_delete_task() {
        let mut store = TaskStore::new();
        let first = store.add_task("First", "", TaskStatus::NotStarted);
        let second = store.add_task("Second", "", TaskStatus::InProgress);
        let third = store.add_task("Third", "", TaskStatus::Done);

        let deleted = store.delete_task(second.id());
        assert_eq!(deleted, Some(second.clone()));

        let tasks = store.tasks();
        assert_eq!(&tasks[..], &[first, third][..]);
        assert!(store.get(second.id()).is_none());

        // Delete again should be a no-op
        let revision = store.revision();
        assert!(store.delete_task(second.id()).is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_snapshots_are_not_mutated() {
        let mut store = TaskStore::new();
        let task = store.add_task("Buy milk", "", TaskStatus::NotStarted);
        let before = store.tasks();

        store.update_task_status(task.id(), TaskStatus::Done);
        store.add_task("Write report", "", TaskStatus::InProgress);

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].status(), TaskStatus::NotStarted);

        let after = store.tasks();
        assert!(!after.ptr_eq(&before));
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].status(), TaskStatus::Done);
    }

    #[test]
    fn test_listeners_receive_each_snapshot() {
        let mut store = TaskStore::new();
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();

        let subscription = {
            let seen = Rc::clone(&seen);
            store.subscribe(move |tasks| seen.borrow_mut().push(tasks.len()))
        };

        let task = store.add_task("First", "", TaskStatus::NotStarted);
        store.add_task("Second", "", TaskStatus::NotStarted);
        store.update_task_status(TaskId::new(), TaskStatus::Done);
        store.delete_task(task.id());

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);

        assert!(store.unsubscribe(subscription));
        assert!(!store.unsubscribe(subscription));
        store.add_task("Third", "", TaskStatus::NotStarted);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_listener_sees_published_snapshot() {
        let mut store = TaskStore::new();
        let last: Rc<RefCell<Option<TaskList>>> = Rc::default();
        {
            let last = Rc::clone(&last);
            store.subscribe(move |tasks| *last.borrow_mut() = Some(tasks.clone()));
        }

        store.add_task("First", "", TaskStatus::NotStarted);

        let published = last.borrow_mut().take().unwrap();
        assert!(published.ptr_eq(&store.tasks()));
    }

    #[test]
    fn test_with_status_filters_in_store_order() {
        let mut store = TaskStore::new();
        store.add_task("A", "", TaskStatus::Done);
        store.add_task("B", "", TaskStatus::NotStarted);
        store.add_task("C", "", TaskStatus::Done);

        let tasks = store.tasks();
        let done: Vec<&str> = tasks
            .with_status(TaskStatus::Done)
            .map(|task| task.title())
            .collect();
        assert_eq!(done, vec!["A", "C"]);
        assert_eq!(tasks.with_status(TaskStatus::InProgress).count(), 0);
    }

    #[test]
    fn test_task_list_serializes_as_array() {
        let mut store = TaskStore::new();
        store.add_task("First", "", TaskStatus::NotStarted);

        let value = serde_json::to_value(store.tasks()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["title"], "First");
    }
}

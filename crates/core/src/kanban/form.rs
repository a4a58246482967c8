//! Add-task form

use tracing::debug;

use crate::error::Error;
use crate::task::{Task, TaskStatus, TaskStore};
use crate::Result;

/// Message shown when the form is submitted without a title
pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a task title";

/// Fields collected before a task is created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddTaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl AddTaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Validate and hand the fields to the store
    ///
    /// On a blank title nothing is added and the form keeps what was entered.
    /// On success the form is cleared.
    pub fn submit(&mut self, store: &mut TaskStore) -> Result<Task> {
        if self.title.trim().is_empty() {
            debug!("Rejected add-task form with empty title");
            return Err(Error::InvalidInput(EMPTY_TITLE_MESSAGE.to_string()));
        }

        let form = std::mem::take(self);
        Ok(store.add_task(form.title, form.description, form.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_adds_task() {
        let mut store = TaskStore::new();
        let mut form = AddTaskForm::new()
            .with_title("Write report")
            .with_description("draft v1")
            .with_status(TaskStatus::InProgress);

        let task = form.submit(&mut store).unwrap();

        assert_eq!(task.title(), "Write report");
        assert_eq!(task.description(), "draft v1");
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert_eq!(store.tasks()[0], task);
        assert_eq!(form, AddTaskForm::default());
    }

    #[test]
    fn test_default_status_is_not_started() {
        let mut store = TaskStore::new();
        let mut form = AddTaskForm::new().with_title("Buy milk");

        let task = form.submit(&mut store).unwrap();
        assert_eq!(task.status(), TaskStatus::NotStarted);
        assert_eq!(task.description(), "");
    }

    #[test]
    fn test_empty_title_is_rejected_and_form_kept() {
        let mut store = TaskStore::new();
        let mut form = AddTaskForm::new()
            .with_title("   ")
            .with_description("keep me")
            .with_status(TaskStatus::Done);
        let entered = form.clone();

        match form.submit(&mut store) {
            Err(Error::InvalidInput(msg)) => assert_eq!(msg, EMPTY_TITLE_MESSAGE),
            other => panic!("Expected InvalidInput error, got: {:?}", other),
        }
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
        assert_eq!(form, entered);

        // Fixing the title and resubmitting keeps the other fields
        form.title = "Groceries".to_string();
        let task = form.submit(&mut store).unwrap();
        assert_eq!(task.description(), "keep me");
        assert_eq!(task.status(), TaskStatus::Done);
    }

    #[test]
    fn test_title_is_stored_as_entered() {
        let mut store = TaskStore::new();
        let mut form = AddTaskForm::new().with_title(" Buy milk ");

        let task = form.submit(&mut store).unwrap();
        assert_eq!(task.title(), " Buy milk ");
    }
}

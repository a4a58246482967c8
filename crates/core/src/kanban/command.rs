//! Board commands
//!
//! Each card control maps to one command. Commands read the task's current
//! status from the store and route the change through the store's operations.

use tracing::info;

use crate::task::{Task, TaskId, TaskStatus, TaskStore};

/// A user action on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    Advance(TaskId),
    Revert(TaskId),
    Delete(TaskId),
}

/// What a command did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Moved {
        id: TaskId,
        title: String,
        from: TaskStatus,
        to: TaskStatus,
    },
    Deleted(Task),
    NotFound(TaskId),
}

impl BoardCommand {
    pub fn task_id(&self) -> TaskId {
        match *self {
            Self::Advance(id) | Self::Revert(id) | Self::Delete(id) => id,
        }
    }

    /// Apply the command to the store
    pub fn apply(self, store: &mut TaskStore) -> CommandOutcome {
        let id = self.task_id();
        let Some(task) = store.get(id) else {
            return CommandOutcome::NotFound(id);
        };
        let from = task.status();
        let title = task.title().to_string();

        let to = match self {
            Self::Advance(_) => from.advance(),
            Self::Revert(_) => from.revert(),
            Self::Delete(_) => {
                return match store.delete_task(id) {
                    Some(task) => {
                        info!(task_id = %id, "Deleted task");
                        CommandOutcome::Deleted(task)
                    }
                    None => CommandOutcome::NotFound(id),
                };
            }
        };

        if !store.update_task_status(id, to) {
            return CommandOutcome::NotFound(id);
        }
        info!(task_id = %id, from = ?from, to = ?to, "Moved task");
        CommandOutcome::Moved { id, title, from, to }
    }
}

impl CommandOutcome {
    /// One-line summary for the user
    pub fn message(&self) -> String {
        match self {
            Self::Moved { title, from, to, .. } if from == to => {
                format!("'{}' stays in {}", title, to)
            }
            Self::Moved { title, to, .. } => format!("Moved '{}' to {}", title, to),
            Self::Deleted(task) => format!("Deleted '{}'", task.title()),
            Self::NotFound(id) => format!("Task not found: {}", id),
        }
    }
}

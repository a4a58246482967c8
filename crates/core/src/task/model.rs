//! Task model definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Unique task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TaskId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| Error::InvalidInput(format!("Invalid task id '{}': {}", s, e)))
    }
}

/// Task status - one board column per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl TaskStatus {
    /// Column order on the board
    pub const ALL: [TaskStatus; 3] = [Self::NotStarted, Self::InProgress, Self::Done];

    /// Next status in the forward cycle
    pub fn advance(self) -> Self {
        match self {
            Self::NotStarted => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::NotStarted,
        }
    }

    /// Previous status; `NotStarted` maps to itself
    pub fn revert(self) -> Self {
        match self {
            Self::NotStarted => Self::NotStarted,
            Self::InProgress => Self::NotStarted,
            Self::Done => Self::InProgress,
        }
    }

    /// Whether the revert control applies to a task in this status
    pub fn can_revert(self) -> bool {
        self != Self::NotStarted
    }

    /// Human readable column title
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    pub(crate) fn column_index(self) -> usize {
        match self {
            Self::NotStarted => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    /// Accepts labels, snake/kebab case and the short `todo`/`doing` aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "notstarted" | "todo" => Ok(Self::NotStarted),
            "inprogress" | "doing" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(Error::InvalidInput(format!(
                "Unknown status '{}' (expected not started, in progress or done)",
                s.trim()
            ))),
        }
    }
}

/// A task on the board
///
/// Only the store creates tasks, and only `status` ever changes after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
}

impl Task {
    pub(crate) fn new(id: TaskId, title: String, description: String, status: TaskStatus) -> Self {
        Self {
            id,
            title,
            description,
            status,
        }
    }

    /// Copy of this task with a different status
    pub(crate) fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }
}
